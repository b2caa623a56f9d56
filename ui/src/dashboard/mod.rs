//! The analytics dashboard: load state, summary cards, chart grid, exports.

mod cards;
mod dayparts;
pub mod export;
mod view;

pub use cards::{summary_cards, CardDetail, CardIcon, CardKind, MetricCard, SummaryCard};
pub use view::CafeDashboard;

use std::rc::Rc;

use crate::charts::{dashboard_charts, ChartSpec};
use crate::core::format::NumberLocale;
use crate::core::provider::LoadError;
use crate::core::snapshot::Snapshot;
use crate::core::theme::Theme;

/// What the dashboard shows for one mount.
///
/// Charts and cards exist only in `Ready`; a failed load never renders a
/// chart with partial or default data.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardState {
    Loading,
    Failed(LoadError),
    Ready(Rc<Snapshot>),
}

impl DashboardState {
    /// Map an in-flight (`None`) or settled load onto a state.
    pub fn from_outcome(outcome: Option<&Result<Rc<Snapshot>, LoadError>>) -> Self {
        match outcome {
            None => DashboardState::Loading,
            Some(Ok(snapshot)) => DashboardState::Ready(Rc::clone(snapshot)),
            Some(Err(err)) => DashboardState::Failed(err.clone()),
        }
    }

    pub fn snapshot(&self) -> Option<&Rc<Snapshot>> {
        match self {
            DashboardState::Ready(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, DashboardState::Loading)
    }

    pub fn error(&self) -> Option<&LoadError> {
        match self {
            DashboardState::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn charts(&self, theme: &Theme, locale: &NumberLocale) -> Vec<ChartSpec> {
        self.snapshot()
            .map(|snapshot| dashboard_charts(snapshot, theme, locale))
            .unwrap_or_default()
    }

    pub fn cards(&self, theme: &Theme, locale: &NumberLocale) -> Vec<SummaryCard> {
        self.snapshot()
            .map(|snapshot| summary_cards(snapshot, theme, locale).to_vec())
            .unwrap_or_default()
    }
}
