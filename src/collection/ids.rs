//! Record id generation.

use chrono::Utc;
use clap::ValueEnum;
use uuid::Uuid;

pub trait IdGenerator: Send {
    fn next_id(&mut self) -> String;
}

/// Millisecond Unix timestamps as decimal strings. Ids are strictly
/// increasing even when several are drawn within the same millisecond.
#[derive(Debug, Default)]
pub struct TimestampIdGenerator {
    last: i64,
}

impl IdGenerator for TimestampIdGenerator {
    fn next_id(&mut self) -> String {
        let now = Utc::now().timestamp_millis();
        self.last = now.max(self.last + 1);
        self.last.to_string()
    }
}

#[derive(Debug, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum IdScheme {
    #[default]
    Timestamp,
    Uuid,
}

pub fn create_id_generator(scheme: IdScheme) -> Box<dyn IdGenerator> {
    match scheme {
        IdScheme::Timestamp => Box::new(TimestampIdGenerator::default()),
        IdScheme::Uuid => Box::new(UuidIdGenerator),
    }
}
