use grabtext_types::ScreenRect;

/// Full-screen dimming surface the user drags a selection on.
///
/// Implementations render everything outside the hole dimmed and the hole itself fully
/// transparent. See [`dimmed_bands`] for the geometry.
pub trait Overlay: Send {
    /// Cut the transparent hole at exactly `hole`
    fn show_hole(&mut self, hole: ScreenRect);

    /// Dim the whole surface again
    fn clear_hole(&mut self);

    /// Make the surface invisible so it doesn't end up in a screen copy
    fn hide(&mut self);

    fn close(&mut self);
}

/// Rectangles covering `screen` minus `hole`, in top, left, right, bottom order.
///
/// Empty bands are omitted, so a hole covering the screen yields nothing and an empty hole
/// yields the whole screen.
pub fn dimmed_bands(screen: ScreenRect, hole: ScreenRect) -> Vec<ScreenRect> {
    let hole = hole.intersect(&screen);
    if hole.is_empty() {
        return if screen.is_empty() { vec![] } else { vec![screen] };
    }

    let top = ScreenRect::new(
        screen.x,
        screen.y,
        screen.width,
        (hole.y as i64 - screen.y as i64) as u32,
    );
    let left = ScreenRect::new(
        screen.x,
        hole.y,
        (hole.x as i64 - screen.x as i64) as u32,
        hole.height,
    );
    let right = ScreenRect::new(
        hole.right() as i32,
        hole.y,
        (screen.right() - hole.right()) as u32,
        hole.height,
    );
    let bottom = ScreenRect::new(
        screen.x,
        hole.bottom() as i32,
        screen.width,
        (screen.bottom() - hole.bottom()) as u32,
    );

    [top, left, right, bottom]
        .into_iter()
        .filter(|band| !band.is_empty())
        .collect()
}
