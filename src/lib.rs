pub mod config;
pub mod fretting;
pub mod instrument;
pub mod logging;
pub mod midi;
pub mod period;
pub mod polyphony;
pub mod pose;
pub mod queue;
pub mod session;
pub mod stick;
pub mod time;
