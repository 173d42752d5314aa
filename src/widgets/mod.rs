pub mod base;
pub mod date_picker;
pub mod traits;

pub use date_picker::DatePicker;
pub use traits::{
    DrawOutput, Drawable, HitArea, HitTarget, InteractionResult, Interactive, RenderContext,
};
