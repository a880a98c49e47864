//! The obis module contains the components responsible for the core telegram
//! processing: frame reassembly, field extraction, and reading validation.

pub mod extract;
pub mod frame;
pub mod reading;
pub mod validate;

pub use extract::{extract, LabelRule, LABEL_RULES};
pub use frame::{Frame, FrameReassembler};
pub use reading::Reading;
pub use validate::ReadingValidator;
