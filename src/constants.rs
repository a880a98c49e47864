//! Protocol and bridge constants.
//!
//! Values here mirror the wire behavior of the meter's D0 readout: telegrams
//! are free-form text blocks terminated by `!`, with one OBIS record per line.

/// Byte that terminates one meter telegram.
pub const FRAME_TERMINATOR: u8 = b'!';

/// Line delimiter inside a telegram.
pub const LINE_DELIMITER: char = '\n';

/// Number of distinct fields a reading must carry before it is publishable.
pub const COMPLETE_FIELD_COUNT: usize = 8;

/// Default minimum interval between published readings, in milliseconds.
pub const DEFAULT_DATA_INTERVAL_MS: u64 = 30_000;

/// Default minimum interval between discovery re-registrations, in milliseconds.
pub const DEFAULT_REGISTER_INTERVAL_MS: u64 = 30_000;

/// Serial readout baud rate used by the meter's optical head.
pub const DEFAULT_BAUD_RATE: u32 = 9600;

/// Size of the transport read buffer, in bytes.
pub const READ_CHUNK_SIZE: usize = 2048;

/// Delay between reconnect attempts after the link drops, in milliseconds.
pub const RECONNECT_DELAY_MS: u64 = 5_000;
