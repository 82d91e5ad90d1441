//! Random Source Adapters
//!
//! - **ThreadRandom** - thread-local RNG (production)
//! - **SeededRandom** - seeded `StdRng` (reproducible output)

mod seeded_random;
mod thread_random;

pub use seeded_random::SeededRandom;
pub use thread_random::ThreadRandom;
