//! Default run parameters
//!
//! These are the values the simulator uses when neither a config file, the
//! environment, nor the command line says otherwise.

/// Agents seated around the table. Increase to increase contention.
pub const DEFAULT_AGENT_COUNT: usize = 15;

/// Servings placed in the source before it is exhausted.
pub const DEFAULT_SERVING_COUNT: u64 = 2000;

/// Pause after releasing both resources. Decrease to increase contention.
pub const DEFAULT_THINK_MS: u64 = 1;

/// Largest serving buffer; bigger supplies are produced while agents eat.
pub const MAX_BOWL_CAPACITY: usize = 1 << 20;

/// Smallest ring for which left and right neighbours are distinct slots.
pub const MIN_AGENT_COUNT: usize = 2;

/// Config file name under the user config directory
pub const CONFIG_DIR_NAME: &str = "dine";
pub const CONFIG_FILE_NAME: &str = "config.toml";
