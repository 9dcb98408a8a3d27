//! Presentation boundary and a plain-text presenter.
//!
//! Map rendering belongs to the platform. This module defines the
//! [`MapPresenter`] seam the runtime hands view models to, plus
//! [`TextPresenter`], which the headless host uses to print each frame.

use crate::ui::viewmodel::MapViewModel;
use std::fmt::Write as _;
use std::io::Write;

/// Receives every view model the runtime decides to render.
pub trait MapPresenter: Send {
    fn present(&mut self, viewmodel: &MapViewModel);
}

/// Writes a textual frame per view model to any [`Write`] sink.
pub struct TextPresenter<W: Write + Send> {
    out: W,
}

impl<W: Write + Send> TextPresenter<W> {
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> MapPresenter for TextPresenter<W> {
    fn present(&mut self, viewmodel: &MapViewModel) {
        let frame = render_text(viewmodel);
        if let Err(e) = self.out.write_all(frame.as_bytes()).and_then(|()| self.out.flush()) {
            tracing::debug!(error = %e, "failed to write frame");
        }
    }
}

impl<W: Write + Send> std::fmt::Debug for TextPresenter<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextPresenter").finish_non_exhaustive()
    }
}

/// Renders a view model as a human-readable frame.
///
/// # Layout
///
/// ```text
/// == map @ -23.55000, -46.63000 ==
/// [Carregando...]
/// filter: ReactJS, Python
/// * octocat (5e7a) at -23.55010, -46.63020
///     (sem bio)
///     ReactJS | Node.js
/// ```
#[must_use]
pub fn render_text(vm: &MapViewModel) -> String {
    let mut frame = String::new();

    if let Some(empty) = &vm.empty_state {
        let _ = writeln!(frame, "== {} ==", empty.message);
        let _ = writeln!(frame, "{}", empty.subtitle);
        return frame;
    }

    match vm.region {
        Some(center) => {
            let _ = writeln!(frame, "== map @ {:.5}, {:.5} ==", center.latitude, center.longitude);
        }
        None => frame.push_str("== map ==\n"),
    }

    if vm.overlay.visible {
        let _ = writeln!(frame, "[{}]", vm.overlay.label);
    }

    if !vm.selection.selected.is_empty() {
        let _ = writeln!(frame, "filter: {}", vm.selection.selected.join(", "));
    }

    for marker in &vm.markers {
        let _ = writeln!(
            frame,
            "* {} ({}) at {:.5}, {:.5}",
            marker.callout.username, marker.developer_id, marker.coordinate.latitude, marker.coordinate.longitude
        );
        let _ = writeln!(frame, "    {}", marker.callout.bio);
        if !marker.callout.techs.is_empty() {
            let _ = writeln!(frame, "    {}", marker.callout.techs.join(" | "));
        }
    }

    frame
}
