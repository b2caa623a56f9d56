use dioxus::prelude::*;

use crate::core::format::{self, NumberLocale};
use crate::core::snapshot::Snapshot;
use crate::core::theme::Theme;
use crate::t;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardKind {
    TotalSales,
    TotalCustomers,
    AverageOrderValue,
    TotalItems,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardIcon {
    Dollar,
    Users,
    Cart,
    Activity,
}

impl CardIcon {
    fn glyph(self) -> &'static str {
        match self {
            CardIcon::Dollar => "$",
            CardIcon::Users => "👥",
            CardIcon::Cart => "🛒",
            CardIcon::Activity => "📈",
        }
    }
}

/// Secondary line under a card's value.
#[derive(Debug, Clone, PartialEq)]
pub enum CardDetail {
    Growth(String),
    Satisfaction(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryCard {
    pub kind: CardKind,
    pub value: String,
    pub detail: Option<CardDetail>,
    pub accent: String,
    pub icon: CardIcon,
}

pub fn summary_cards(snapshot: &Snapshot, theme: &Theme, locale: &NumberLocale) -> [SummaryCard; 4] {
    [
        SummaryCard {
            kind: CardKind::TotalSales,
            value: format::format_currency(snapshot.total_sales, locale),
            detail: Some(CardDetail::Growth(format::format_percent_signed(
                snapshot.sales_growth,
                locale,
            ))),
            accent: theme.success.clone(),
            icon: CardIcon::Dollar,
        },
        SummaryCard {
            kind: CardKind::TotalCustomers,
            value: format::format_integer(snapshot.customer_count, locale),
            detail: Some(CardDetail::Satisfaction(format::format_decimal(
                snapshot.customer_satisfaction,
                1,
                locale,
            ))),
            accent: theme.primary.clone(),
            icon: CardIcon::Users,
        },
        SummaryCard {
            kind: CardKind::AverageOrderValue,
            value: format::format_currency(snapshot.avg_order_value, locale),
            detail: None,
            accent: theme.accent.clone(),
            icon: CardIcon::Cart,
        },
        SummaryCard {
            kind: CardKind::TotalItems,
            value: format::format_integer(snapshot.total_items, locale),
            detail: None,
            accent: theme.quaternary.clone(),
            icon: CardIcon::Activity,
        },
    ]
}

fn card_label(kind: CardKind) -> String {
    match kind {
        CardKind::TotalSales => t!("card-total-sales"),
        CardKind::TotalCustomers => t!("card-total-customers"),
        CardKind::AverageOrderValue => t!("card-avg-order"),
        CardKind::TotalItems => t!("card-items-sold"),
    }
}

fn detail_text(detail: &CardDetail) -> String {
    match detail {
        CardDetail::Growth(growth) => t!("card-sales-growth", growth = growth.as_str()),
        CardDetail::Satisfaction(rating) => t!("card-satisfaction", rating = rating.as_str()),
    }
}

#[component]
pub fn SummaryCards(cards: Vec<SummaryCard>) -> Element {
    rsx! {
        div { class: "dashboard__cards",
            for card in cards.into_iter() {
                MetricCard {
                    key: "{card.kind:?}",
                    label: card_label(card.kind),
                    value: card.value,
                    sub_label: card.detail.as_ref().map(detail_text),
                    color: card.accent,
                    icon: card.icon,
                }
            }
        }
    }
}

#[component]
pub fn MetricCard(
    label: String,
    value: String,
    sub_label: Option<String>,
    color: String,
    icon: CardIcon,
) -> Element {
    rsx! {
        div { class: "metric-card", style: "border-left-color: {color}",
            div { class: "metric-card__body",
                p { class: "metric-card__label", "{label}" }
                p { class: "metric-card__value", style: "color: {color}", "{value}" }
                if let Some(sub) = sub_label {
                    p { class: "metric-card__sub", "{sub}" }
                }
            }
            div {
                class: "metric-card__icon",
                style: "color: {color}; background-color: color-mix(in srgb, {color} 8%, transparent)",
                aria_hidden: "true",
                {icon.glyph()}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::format::EN_US;
    use crate::core::snapshot::fixtures::snapshot;

    #[test]
    fn total_sales_card_renders_whole_dollars() {
        let cards = summary_cards(&snapshot(), &Theme::default(), &EN_US);
        assert_eq!(cards[0].kind, CardKind::TotalSales);
        assert_eq!(cards[0].value, "$125,000");
        assert_eq!(cards[0].detail, Some(CardDetail::Growth("+15.4%".into())));
        assert_eq!(cards[0].accent, Theme::default().success);
    }

    #[test]
    fn remaining_cards_follow_reference_layout() {
        let cards = summary_cards(&snapshot(), &Theme::default(), &EN_US);
        assert_eq!(cards[1].value, "4,500");
        assert_eq!(cards[1].detail, Some(CardDetail::Satisfaction("4.8".into())));
        assert_eq!(cards[2].value, "$28");
        assert_eq!(cards[2].detail, None);
        assert_eq!(cards[3].value, "8,750");
        assert_eq!(cards[3].detail, None);
        assert_eq!(cards[3].icon, CardIcon::Activity);
    }
}
