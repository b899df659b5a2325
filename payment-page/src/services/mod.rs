pub mod checkout;
pub mod client_surface;
pub mod device;
pub mod dispatcher;
pub mod metrics;
pub mod upi;
pub mod whatsapp;

pub use client_surface::{ClientSurface, ClipboardReport, Effect};
pub use device::{is_mobile_runtime, Device};
pub use dispatcher::{ChannelDispatcher, DispatchError, Surface, SurfaceError};
pub use metrics::{get_metrics, init_metrics};
pub use upi::{build_upi_link, UpiService};
