pub mod host;
pub mod mapper;
pub mod pane;
pub mod price_scale;
pub mod primitives;
pub mod scale;
pub mod simulated_host;
pub mod time_scale;
pub mod types;

pub use host::{HostChart, PriceLineId, PriceLineOptions, PriceLineStyle};
pub use mapper::CoordinateMapper;
pub use pane::{PaneCollection, PaneDescriptor, PaneId, PaneLayoutRegion};
pub use price_scale::PriceScale;
pub use scale::LinearScale;
pub use simulated_host::SimulatedHost;
pub use time_scale::TimeScale;
pub use types::{DomainPoint, PixelPoint, Viewport};
