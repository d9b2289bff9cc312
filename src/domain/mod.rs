pub mod event;
pub mod hand_record;
pub mod private_cards;
pub mod seat;
pub mod table;

pub use event::{Event, EventKind};
pub use hand_record::{HandRecord, NotableFlags, PotShare, Winner};
pub use private_cards::PrivateHoleCards;
pub use seat::{Seat, SeatStatus};
pub use table::{Round, Stage, Table, TableConfig, TableStatus};
