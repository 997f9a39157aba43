pub mod events;

pub use self::events::{Channel, Key, NoteEvent, NoteOff, NoteOn, Timed, Velocity};
