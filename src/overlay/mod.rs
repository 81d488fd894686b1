pub mod controller;
pub mod fade;
pub mod window;

pub use controller::{
    DragSession, OverlayController, OverlaySettings, OverlayState, Phase, SizePolicy,
};
pub use fade::{FadePlan, FadeStep, TimerQueue};
pub use window::{LinkOpener, OverlayWindow, SystemLinkOpener};
