pub mod bars;
pub mod fraction;
pub mod metric;
pub mod signature;
pub mod tempo;
pub mod ticks;

pub use self::bars::BarsTime;
pub use self::fraction::FractionTime;
pub use self::metric::MetricTime;
pub use self::signature::{Signature, TimeDivision};
pub use self::tempo::Tempo;
pub use self::ticks::TicksTime;
