//! Instrument payload model for a measurement container.
//!
//! This library describes the instruments hosted by a container, loads them
//! from a JSON or YAML configuration file, enforces ID uniqueness and the
//! rules for reserved IDs, and tracks each instrument's operating state.
//!
//! ```rust,ignore
//! use container_payload::{Payload, State};
//!
//! let mut payload = Payload::load("config/payload.yaml")?;
//! for id in payload.ids() {
//!     print!("{}", payload.get(id).unwrap());
//! }
//! if let Some(inst) = payload.get_mut(7) {
//!     inst.state = State::WarmUp;
//! }
//! ```

pub mod error;
pub mod instrument;
pub mod loader;
pub mod logging;
pub mod payload;
pub mod settings;
pub mod state;

pub use error::{PayloadError, PayloadResult};
pub use instrument::{Instrument, ADDRESS_BYTES_LEN, CRIO_ID, MASTER_ID, UNSET_ID};
pub use loader::{ConfigFormat, JsonDecoder, PayloadSource, RecordDecoder, YamlDecoder};
pub use payload::Payload;
pub use settings::Settings;
pub use state::State;
