use jiff::Timestamp;

use crate::util::OrderIdScheme;

const PREFIX: &str = "ORD-";

/// Generates order ids following an [`OrderIdScheme`].
/// The generator does not guarantee uniqueness for [`OrderIdScheme::Timestamp`],
/// the caller checks generated ids against the ones already in use.
#[derive(Clone, Debug)]
pub struct OrderIdGenerator {
    scheme: OrderIdScheme,
    last_seq: u64,
}

impl OrderIdGenerator {
    /// Creates a generator that continues after the highest sequence number among `existing`.
    pub fn new<'a>(scheme: OrderIdScheme, existing: impl IntoIterator<Item = &'a str>) -> Self {
        let last_seq = existing.into_iter().filter_map(parse_seq).max().unwrap_or(0);
        Self { scheme, last_seq }
    }

    pub fn scheme(&self) -> OrderIdScheme {
        self.scheme
    }

    pub fn next_id(&mut self) -> String {
        match self.scheme {
            OrderIdScheme::Timestamp => format!("{PREFIX}{}", Timestamp::now().as_millisecond()),
            OrderIdScheme::Sequential => {
                self.last_seq += 1;
                format!("{PREFIX}{}", self.last_seq)
            }
        }
    }
}

fn parse_seq(order_id: &str) -> Option<u64> {
    order_id.strip_prefix(PREFIX)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_ids_continue_after_existing_ones() {
        let mut ids = OrderIdGenerator::new(OrderIdScheme::Sequential, ["ORD-4", "ORD-12", "custom"]);
        assert_eq!(ids.next_id(), "ORD-13");
        assert_eq!(ids.next_id(), "ORD-14");
    }

    #[test]
    fn timestamp_ids_carry_the_clock() {
        let before = Timestamp::now().as_millisecond();
        let id = OrderIdGenerator::new(OrderIdScheme::Timestamp, []).next_id();
        let millis = parse_seq(&id).unwrap() as i64;
        assert!(millis >= before);
    }
}
