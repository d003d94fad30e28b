use crate::classifier::{classify, Classification};
use crate::data_transfer::Event;
use crate::join::RegionJoin;
use crate::selection::SelectionState;
use regions::GovernorateName;
use std::fmt;

pub const SELECT_REGION_PROMPT: &str = "Click on a region to see details";
pub const NO_EVENTS_MESSAGE: &str = "No approved events found for this region.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewer {
    Anonymous,
    SignedIn,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailPanel {
    Prompt,
    Region(RegionDetail),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegionDetail {
    pub name: GovernorateName,
    pub score: u32,
    pub classification: Classification,
    pub events_count: u32,
    pub last_updated: Option<String>,
    pub events: EventListing,
    pub call_to_action: SuggestionCallToAction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventListing {
    Empty,
    Listed(Vec<Event>),
}

impl EventListing {
    fn new(events: Vec<Event>) -> Self {
        if events.is_empty() {
            EventListing::Empty
        } else {
            EventListing::Listed(events)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionCallToAction {
    /// The suggestion form opens with the city pre-filled.
    SuggestEvent { city: GovernorateName },
    LoginToSuggest { region: GovernorateName },
}

impl DetailPanel {
    pub fn render(
        selection: &SelectionState,
        join: &RegionJoin,
        viewer: Viewer,
        last_updated: Option<&str>,
    ) -> Self {
        let Some(name) = selection.selected() else {
            return DetailPanel::Prompt;
        };
        let record = join.record_or_default(name);
        let call_to_action = match viewer {
            Viewer::SignedIn => SuggestionCallToAction::SuggestEvent { city: name.clone() },
            Viewer::Anonymous => SuggestionCallToAction::LoginToSuggest {
                region: name.clone(),
            },
        };

        DetailPanel::Region(RegionDetail {
            name: name.clone(),
            score: record.score,
            classification: classify(record.score),
            events_count: record.events_count,
            last_updated: last_updated.map(ToOwned::to_owned),
            events: EventListing::new(record.events),
            call_to_action,
        })
    }
}

impl fmt::Display for DetailPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetailPanel::Prompt => writeln!(f, "{SELECT_REGION_PROMPT}"),
            DetailPanel::Region(detail) => fmt::Display::fmt(detail, f),
        }
    }
}

impl fmt::Display for RegionDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "Governorate Details")?;
        writeln!(
            f,
            "{} ({})",
            self.classification.tier.activity_label(),
            self.classification.color
        )?;
        writeln!(f)?;
        writeln!(f, "Activity Score: {}", self.score)?;
        writeln!(f, "Events This Month: {}", self.events_count)?;
        writeln!(
            f,
            "Last Updated: {}",
            self.last_updated.as_deref().unwrap_or("-")
        )?;
        writeln!(f)?;
        writeln!(f, "Upcoming Events:")?;
        match &self.events {
            EventListing::Empty => writeln!(f, "{NO_EVENTS_MESSAGE}")?,
            EventListing::Listed(events) => {
                for event in events {
                    writeln!(f, "- {}", event.name)?;
                    writeln!(f, "  {} • {}", event.place, event.city)?;
                    writeln!(f, "  {} • {}", event.date, event.price)?;
                    if let Some(url) = &event.url {
                        writeln!(f, "  Get Tickets: {url}")?;
                    }
                }
            }
        }
        writeln!(f)?;
        match &self.call_to_action {
            SuggestionCallToAction::SuggestEvent { .. } => writeln!(f, "+ Suggest Event"),
            SuggestionCallToAction::LoginToSuggest { region } => writeln!(
                f,
                "Know about an event happening in {region}? Login to Suggest"
            ),
        }
    }
}
