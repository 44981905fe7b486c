//! Password synthesis through interchangeable hash strategies.
//!
//! Each character of a password is chosen by mixing a monotonic clock
//! reading, a position offset and a CSPRNG draw into a 64-bit value, then
//! hashing that value into an index of the candidate character set.
//!
//! Three strategies are available:
//!
//! - **Division**: `|k mod m|`. Fastest, weakest on adversarial input.
//! - **Multiplicative**: Knuth's integer method. The low 32 bits of `k` are
//!   multiplied by `2654435769` and the high 32 bits of the product are
//!   reduced mod `m`.
//! - **Universal**: `((a*k + b) mod p) mod m` with `a`, `b` and `p` drawn
//!   once per instance, so every session gets a different mapping.
//!
//! ```
//! use hashpass_synth::{Algorithm, synthesize};
//!
//! let password = synthesize("AB", 5, Algorithm::Universal).unwrap();
//! assert_eq!(password.len(), 5);
//! assert!(password.chars().all(|c| c == 'A' || c == 'B'));
//! ```

pub mod charset;
pub mod error;
pub mod hash;
pub mod strength;
pub mod synth;

pub use charset::{CharClasses, CharacterSet};
pub use error::{Error, Result};
pub use hash::{Algorithm, HashFunction, LARGE_PRIMES, UniversalParams};
pub use strength::{Strength, StrengthReport, evaluate};
#[cfg(feature = "tokio")]
pub use synth::synthesize_async;
pub use synth::{PasswordSynthesizer, synthesize};
