// Form controls
pub mod button;
pub mod form;
pub mod input;
pub mod multi_select;
pub mod textarea;

// Layout and overlays
pub mod card;
pub mod sheet;
pub mod toast;

pub use button::*;
pub use card::*;
pub use form::*;
pub use input::*;
pub use multi_select::*;
pub use sheet::*;
pub use textarea::*;
pub use toast::*;
