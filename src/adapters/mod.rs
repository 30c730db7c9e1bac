//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter       | Implements        | Connects to                    |
//! |---------------|-------------------|--------------------------------|
//! | `config_file` | ConfigPort        | JSON file on disk              |
//! | `desktop`     | PointerPort       | Simulated pointer              |
//! |               | PresentationPort  | Console surface (log output)   |
//! | `frames`      | FrameSource       | Built-in table / asset folder  |
//! | `log_sink`    | EventSink         | `log` facade                   |
//! | `random`      | RandomSource      | Seeded `StdRng` / fixed rolls  |

pub mod config_file;
pub mod desktop;
pub mod frames;
pub mod log_sink;
pub mod random;
