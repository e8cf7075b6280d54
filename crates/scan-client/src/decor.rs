use std::ops::Range;
use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::runtime::Handle;
use tracing::debug;
use uuid::Uuid;

use crate::page::{Page, Particle, Toast, ToastKind};

const PARTICLE_LEFT_PCT: Range<f64> = 0.0..100.0;
const PARTICLE_SIZE_PX: Range<f64> = 2.0..6.0;
const PARTICLE_DELAY_SECS: Range<f64> = 0.0..15.0;
const PARTICLE_DURATION_SECS: Range<f64> = 10.0..20.0;

pub(crate) fn spawn_particles<R: Rng + ?Sized>(page: &dyn Page, count: usize, rng: &mut R) {
    for _ in 0..count {
        page.add_particle(Particle {
            left_pct: rng.gen_range(PARTICLE_LEFT_PCT),
            size_px: rng.gen_range(PARTICLE_SIZE_PX),
            delay_secs: rng.gen_range(PARTICLE_DELAY_SECS),
            duration_secs: rng.gen_range(PARTICLE_DURATION_SECS),
        });
    }
}

/// Shows a toast and schedules its dismissal. Outside a runtime the toast
/// simply stays up.
pub(crate) fn show_toast(
    page: Arc<dyn Page>,
    message: &str,
    kind: ToastKind,
    dismiss_after: Duration,
) -> Uuid {
    let toast = Toast {
        id: Uuid::new_v4(),
        message: message.to_string(),
        kind,
    };
    page.show_toast(&toast);
    let id = toast.id;
    debug!(%id, kind = kind.as_str(), "toast shown");
    if let Ok(handle) = Handle::try_current() {
        handle.spawn(async move {
            tokio::time::sleep(dismiss_after).await;
            page.dismiss_toast(id);
        });
    }
    id
}
