//! Daypart breakdown of the hourly activity series.
//!
//! Hours are bucketed two ways: coarse time blocks (morning, afternoon,
//! evening) and trading bands (the three rush peaks versus everything else).

use serde::Serialize;

use super::snapshot::HourlyActivity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum TimeBlock {
    Morning,
    Afternoon,
    Evening,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum TradingBand {
    MorningPeak,
    LunchPeak,
    EveningPeak,
    LowTraffic,
}

impl TimeBlock {
    pub const ALL: [TimeBlock; 3] = [TimeBlock::Morning, TimeBlock::Afternoon, TimeBlock::Evening];

    /// 06–11 morning, 12–16 afternoon, everything else (night included) evening.
    pub fn of_hour(hour: u8) -> Self {
        match hour {
            6..=11 => TimeBlock::Morning,
            12..=16 => TimeBlock::Afternoon,
            _ => TimeBlock::Evening,
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            TimeBlock::Morning => "morning",
            TimeBlock::Afternoon => "afternoon",
            TimeBlock::Evening => "evening",
        }
    }
}

impl TradingBand {
    pub const ALL: [TradingBand; 4] = [
        TradingBand::MorningPeak,
        TradingBand::LunchPeak,
        TradingBand::EveningPeak,
        TradingBand::LowTraffic,
    ];

    pub fn of_hour(hour: u8) -> Self {
        match hour {
            7..=9 => TradingBand::MorningPeak,
            12..=13 => TradingBand::LunchPeak,
            17..=18 => TradingBand::EveningPeak,
            _ => TradingBand::LowTraffic,
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            TradingBand::MorningPeak => "morning-peak",
            TradingBand::LunchPeak => "lunch-peak",
            TradingBand::EveningPeak => "evening-peak",
            TradingBand::LowTraffic => "low-traffic",
        }
    }
}

/// Totals over a set of hours.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct DaypartTotals {
    pub hours: u32,
    pub traffic: u64,
    pub revenue: f64,
    pub orders: u64,
}

impl DaypartTotals {
    fn add(&mut self, entry: &HourlyActivity) {
        self.hours += 1;
        self.traffic += u64::from(entry.traffic);
        self.revenue += entry.revenue;
        self.orders += u64::from(entry.orders);
    }

    /// Revenue per order; `None` when no orders were placed.
    pub fn average_order_value(&self) -> Option<f64> {
        (self.orders > 0).then(|| self.revenue / self.orders as f64)
    }

    /// This part's share of `total` revenue in [0, 1].
    pub fn revenue_share(&self, total: f64) -> f64 {
        if total > 0.0 {
            self.revenue / total
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaypartSummary {
    pub blocks: Vec<(TimeBlock, DaypartTotals)>,
    pub bands: Vec<(TradingBand, DaypartTotals)>,
    pub total_revenue: f64,
    /// Hour with the highest revenue; the earliest wins a tie.
    pub busiest_hour: Option<u8>,
}

pub fn summarize(hours: &[HourlyActivity]) -> DaypartSummary {
    let mut blocks = TimeBlock::ALL.map(|block| (block, DaypartTotals::default()));
    let mut bands = TradingBand::ALL.map(|band| (band, DaypartTotals::default()));
    let mut busiest: Option<&HourlyActivity> = None;

    for entry in hours {
        let block = TimeBlock::of_hour(entry.hour);
        let band = TradingBand::of_hour(entry.hour);
        if let Some((_, totals)) = blocks.iter_mut().find(|(b, _)| *b == block) {
            totals.add(entry);
        }
        if let Some((_, totals)) = bands.iter_mut().find(|(b, _)| *b == band) {
            totals.add(entry);
        }
        if busiest.map_or(true, |best| entry.revenue > best.revenue) {
            busiest = Some(entry);
        }
    }

    DaypartSummary {
        total_revenue: hours.iter().map(|h| h.revenue).sum(),
        blocks: blocks.to_vec(),
        bands: bands.to_vec(),
        busiest_hour: busiest.map(|entry| entry.hour),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hour(hour: u8, revenue: f64, orders: u32) -> HourlyActivity {
        HourlyActivity {
            hour,
            traffic: 10,
            revenue,
            orders,
        }
    }

    #[test]
    fn hours_map_to_blocks() {
        assert_eq!(TimeBlock::of_hour(5), TimeBlock::Evening);
        assert_eq!(TimeBlock::of_hour(6), TimeBlock::Morning);
        assert_eq!(TimeBlock::of_hour(11), TimeBlock::Morning);
        assert_eq!(TimeBlock::of_hour(12), TimeBlock::Afternoon);
        assert_eq!(TimeBlock::of_hour(16), TimeBlock::Afternoon);
        assert_eq!(TimeBlock::of_hour(17), TimeBlock::Evening);
    }

    #[test]
    fn hours_map_to_bands() {
        assert_eq!(TradingBand::of_hour(6), TradingBand::LowTraffic);
        assert_eq!(TradingBand::of_hour(7), TradingBand::MorningPeak);
        assert_eq!(TradingBand::of_hour(10), TradingBand::LowTraffic);
        assert_eq!(TradingBand::of_hour(13), TradingBand::LunchPeak);
        assert_eq!(TradingBand::of_hour(18), TradingBand::EveningPeak);
        assert_eq!(TradingBand::of_hour(19), TradingBand::LowTraffic);
    }

    #[test]
    fn full_day_covers_every_hour_once() {
        let day: Vec<_> = (0..24).map(|h| hour(h, 100.0, 4)).collect();
        let summary = summarize(&day);
        let block_hours: u32 = summary.blocks.iter().map(|(_, t)| t.hours).sum();
        let band_hours: u32 = summary.bands.iter().map(|(_, t)| t.hours).sum();
        assert_eq!(block_hours, 24);
        assert_eq!(band_hours, 24);
        assert_eq!(summary.total_revenue, 2400.0);

        let (_, morning) = summary.blocks[0];
        assert_eq!(morning.hours, 6);
        assert_eq!(morning.average_order_value(), Some(25.0));
        assert!((morning.revenue_share(summary.total_revenue) - 0.25).abs() < 1e-9);
    }

    #[test]
    fn busiest_hour_prefers_earliest_tie() {
        let day = vec![hour(0, 50.0, 1), hour(1, 90.0, 1), hour(2, 90.0, 1)];
        assert_eq!(summarize(&day).busiest_hour, Some(1));
    }

    #[test]
    fn zero_orders_have_no_average() {
        let totals = DaypartTotals::default();
        assert_eq!(totals.average_order_value(), None);
        assert_eq!(totals.revenue_share(0.0), 0.0);
    }
}
