//! Bounded-retry drawing of images that may still be loading.
//!
//! A draw against a pending image is parked and retried every [`RETRY_INTERVAL`] on a virtual
//! clock advanced by the caller. Each retry draws under the surface transform captured at the
//! first attempt, then puts back whatever transform the surface had at retry time.

use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use crate::assets::handle::{ImageHandle, ImageState};
use crate::foundation::core::{Affine, Rect};
use crate::foundation::math::x_axis_scale;
use crate::render::surface::{Surface, SurfaceHandle, SurfaceId, WeakSurface};

/// Delay between two attempts at a pending draw.
pub const RETRY_INTERVAL: Duration = Duration::from_millis(100);

/// Retries made after the first attempt before a pending draw is abandoned.
pub const MAX_RETRIES: u32 = 100;

/// What a draw attempt did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawOutcome {
    /// The image was drawn.
    Drawn,
    /// The image is still loading; a retry is queued.
    Scheduled,
    /// Nothing was drawn and nothing is queued.
    Skipped,
}

#[derive(Debug)]
struct PendingDraw {
    due: Duration,
    attempt: u32,
    handle: Rc<ImageHandle>,
    surface: WeakSurface,
    rect: Rect,
    transform: Affine,
}

/// Queue of parked draws plus the virtual clock that drives them.
#[derive(Debug)]
pub struct DeferredDraws {
    now: Duration,
    device_scale: f64,
    queue: VecDeque<PendingDraw>,
}

impl DeferredDraws {
    pub fn new(device_scale: f64) -> Self {
        Self {
            now: Duration::ZERO,
            device_scale,
            queue: VecDeque::new(),
        }
    }

    /// Virtual time elapsed so far.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of parked draws.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Draw `handle` into `rect` on `surface` under its current transform, or park the draw
    /// when the image is still loading.
    pub fn draw(
        &mut self,
        handle: &Rc<ImageHandle>,
        surface: &SurfaceHandle,
        rect: Rect,
    ) -> DrawOutcome {
        match handle.state() {
            ImageState::Failed => {
                report_failure(handle);
                DrawOutcome::Skipped
            }
            ImageState::Ready => {
                let mut s = surface.borrow_mut();
                draw_scaled(handle, &mut *s, surface.id(), rect, self.device_scale);
                DrawOutcome::Drawn
            }
            ImageState::Pending => {
                let transform = surface.borrow().transform();
                self.schedule(PendingDraw {
                    due: self.now + RETRY_INTERVAL,
                    attempt: 1,
                    handle: handle.clone(),
                    surface: surface.downgrade(),
                    rect,
                    transform,
                });
                DrawOutcome::Scheduled
            }
        }
    }

    /// Advance the clock by `elapsed`, running every retry that falls due, in due order.
    ///
    /// Returns the number of parked draws that completed.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        let target = self.now + elapsed;
        let mut drawn = 0;

        while self.queue.front().is_some_and(|p| p.due <= target) {
            let Some(item) = self.queue.pop_front() else {
                break;
            };
            self.now = item.due;
            if self.retry(item) {
                drawn += 1;
            }
        }

        self.now = target;
        drawn
    }

    /// Drop parked draws aimed at `surface`.
    pub fn cancel_surface(&mut self, surface: SurfaceId) -> usize {
        let before = self.queue.len();
        self.queue.retain(|p| p.surface.id() != surface);
        before - self.queue.len()
    }

    fn retry(&mut self, item: PendingDraw) -> bool {
        let Some(surface) = item.surface.upgrade() else {
            tracing::debug!(url = %item.handle.url(), "surface dropped; abandoning deferred draw");
            return false;
        };

        match item.handle.state() {
            ImageState::Failed => {
                report_failure(&item.handle);
                false
            }
            ImageState::Ready => {
                let mut s = surface.borrow_mut();
                let prior = s.transform();
                s.set_transform(item.transform);
                draw_scaled(&item.handle, &mut *s, surface.id(), item.rect, self.device_scale);
                s.set_transform(prior);
                tracing::trace!(
                    url = %item.handle.url(),
                    attempt = item.attempt,
                    "deferred draw completed"
                );
                true
            }
            ImageState::Pending if item.attempt < MAX_RETRIES => {
                self.schedule(PendingDraw {
                    due: self.now + RETRY_INTERVAL,
                    attempt: item.attempt + 1,
                    ..item
                });
                false
            }
            ImageState::Pending => {
                tracing::debug!(
                    url = %item.handle.url(),
                    retries = MAX_RETRIES,
                    "image never loaded; giving up"
                );
                false
            }
        }
    }

    fn schedule(&mut self, item: PendingDraw) {
        tracing::debug!(
            url = %item.handle.url(),
            attempt = item.attempt,
            "image not ready; retry scheduled"
        );
        let pos = self.queue.partition_point(|p| p.due <= item.due);
        self.queue.insert(pos, item);
    }
}

fn draw_scaled(
    handle: &ImageHandle,
    surface: &mut dyn Surface,
    id: SurfaceId,
    rect: Rect,
    device_scale: f64,
) {
    let device_width = rect.width() * x_axis_scale(surface.transform()) * device_scale;
    if let Some(bitmap) = handle.scaled_for(id, device_width) {
        surface.draw_image(&bitmap, rect);
    }
}

fn report_failure(handle: &ImageHandle) {
    if handle.take_failure_report() {
        tracing::warn!(
            url = %handle.url(),
            reason = handle.failure().unwrap_or_default(),
            "image failed to load; skipping draws"
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/deferred.rs"]
mod tests;
