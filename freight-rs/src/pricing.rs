use jiff::ToSpan;
use jiff::civil::Date;

use crate::entities::ContainerClass;

/// Distance a shipment covers per day, in km
pub const KM_PER_DAY: u32 = 500;

/// Price of a shipment: distance times the rate of the booked container class
pub fn price(distance_km: u32, class: ContainerClass) -> u64 {
    distance_km as u64 * class.rate()
}

/// Number of days needed to cover `distance_km`, rounded up
pub fn transit_days(distance_km: u32) -> u32 {
    distance_km.div_ceil(KM_PER_DAY)
}

/// Expected delivery date of a shipment leaving on `departure`
pub fn estimate_delivery_date(distance_km: u32, departure: Date) -> Date {
    let days = transit_days(distance_km) as i64;
    departure.saturating_add(days.days())
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    #[test]
    fn price_scales_with_class_rate() {
        assert_eq!(price(1000, ContainerClass::Small), 5000);
        assert_eq!(price(1000, ContainerClass::Medium), 8000);
        assert_eq!(price(3000, ContainerClass::Large), 36000);
        assert_eq!(price(0, ContainerClass::Large), 0);
    }

    #[test]
    fn delivery_takes_a_day_per_started_500_km() {
        let start = date(2025, 2, 27);
        assert_eq!(estimate_delivery_date(0, start), start);
        assert_eq!(estimate_delivery_date(500, start), date(2025, 2, 28));
        assert_eq!(estimate_delivery_date(501, start), date(2025, 3, 1));
        assert_eq!(estimate_delivery_date(3000, start), date(2025, 3, 5));
    }
}
