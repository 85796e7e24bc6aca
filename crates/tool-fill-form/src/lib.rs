pub mod api;
pub mod errors;
pub mod guard;
pub mod matcher;
pub mod memory;
pub mod model;
pub mod ports;

mod runner;
mod selector;

pub use api::FormFiller;
pub use errors::FillError;
pub use guard::{FillGuard, FillTicket};
pub use matcher::{match_option, MatchKind, OptionMatch};
pub use memory::{MemoryControl, MemoryPage, PageFixture};
pub use model::{FieldOutcome, FillResult};
pub use ports::{
    ChoiceOption, ControlKind, ElementHandle, PageError, PageEvent, PagePort, ResolvedElement,
};
