use crate::classifier::{FillColor, Tier};
use crate::contracts::fetch_activity::{ActivityFetcher, FetchActivityError};
use crate::data_transfer::ActivityLookup;
use crate::detail_panel::{DetailPanel, Viewer};
use crate::join::RegionJoin;
use crate::selection::{DispatchTable, Interaction, InteractionState, SelectionState};
use geojson::FeatureCollection;
use regions::{GovernorateName, RegionCatalog};
use shared_kernel::tunis_date_time::TunisTZDateTime;

pub const LOADING_MESSAGE: &str = "Loading Data...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    /// `fetched_at` is only known when the fetch succeeded.
    Ready { fetched_at: Option<TunisTZDateTime> },
}

/// Owns everything the dashboard shows: the boundaries, the latest fetched
/// activity, the join between the two and the user's selection.
/// State only changes through `set_data`, `handle` and the selection methods.
pub struct HeatmapView {
    catalog: RegionCatalog,
    lookup: ActivityLookup,
    join: RegionJoin,
    interaction: InteractionState,
    load_state: LoadState,
    dispatch_table: DispatchTable,
}

impl HeatmapView {
    /// Starts out loading, with every region at the zero default.
    pub fn new(catalog: RegionCatalog) -> Self {
        let lookup = ActivityLookup::default();
        let join = RegionJoin::new(&catalog, &lookup);
        Self {
            catalog,
            lookup,
            join,
            interaction: InteractionState::default(),
            load_state: LoadState::Loading,
            dispatch_table: DispatchTable::new(),
        }
    }

    /// Runs the one fetch of this view. A failed fetch is logged and the map
    /// falls back to empty data.
    #[tracing::instrument(skip_all, level = "info")]
    pub async fn load(&mut self, fetcher: &ActivityFetcher) {
        let result = fetcher.fetch().await;
        self.finish_fetch(result);
    }

    pub fn finish_fetch(&mut self, result: Result<ActivityLookup, FetchActivityError>) {
        match result {
            Ok(lookup) => self.set_data(lookup, Some(TunisTZDateTime::now())),
            Err(err) => {
                tracing::error!(error = ?err, "Error fetching heatmap data");
                self.set_data(ActivityLookup::default(), None);
            }
        }
    }

    /// Replaces the fetched data as a whole and rebuilds the join.
    /// Selection is left untouched.
    pub fn set_data(&mut self, lookup: ActivityLookup, fetched_at: Option<TunisTZDateTime>) {
        self.join = RegionJoin::new(&self.catalog, &lookup);
        self.lookup = lookup;
        self.load_state = LoadState::Ready { fetched_at };
    }

    pub fn handle(&mut self, interaction: Interaction, name: &GovernorateName) {
        let state = std::mem::take(&mut self.interaction);
        self.interaction = self.dispatch_table.dispatch(interaction, name, state);
    }

    pub fn select(&mut self, name: &GovernorateName) {
        self.handle(Interaction::Click, name);
    }

    pub fn clear_selection(&mut self) {
        let selection = std::mem::take(&mut self.interaction.selection);
        self.interaction.selection = selection.clear();
    }

    pub fn selection(&self) -> &SelectionState {
        &self.interaction.selection
    }

    pub fn hovered(&self) -> Option<&GovernorateName> {
        self.interaction.hovered.as_ref()
    }

    pub fn catalog(&self) -> &RegionCatalog {
        &self.catalog
    }

    pub fn lookup(&self) -> &ActivityLookup {
        &self.lookup
    }

    pub fn join(&self) -> &RegionJoin {
        &self.join
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn is_loading(&self) -> bool {
        self.load_state == LoadState::Loading
    }

    /// eg: "October 2026", once a fetch has succeeded.
    pub fn month_label(&self) -> Option<String> {
        match &self.load_state {
            LoadState::Ready {
                fetched_at: Some(fetched_at),
            } => Some(fetched_at.month_label()),
            _ => None,
        }
    }

    pub fn header(&self) -> String {
        match self.month_label() {
            Some(month) => format!("Showing nightlife activity levels for {month}"),
            None => "Showing nightlife activity levels".to_string(),
        }
    }

    /// What sits above the map: the loading indicator until the fetch settles.
    pub fn status_line(&self) -> String {
        if self.is_loading() {
            LOADING_MESSAGE.to_string()
        } else {
            self.header()
        }
    }

    pub fn legend(&self) -> Vec<(String, FillColor)> {
        Tier::ALL
            .iter()
            .map(|tier| (tier.legend_label(), tier.color()))
            .collect()
    }

    pub fn render_map(&self) -> FeatureCollection {
        self.join.to_feature_collection(self.hovered())
    }

    pub fn detail_panel(&self, viewer: Viewer) -> DetailPanel {
        let month = self.month_label();
        DetailPanel::render(self.selection(), &self.join, viewer, month.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::{HeatmapView, LoadState, LOADING_MESSAGE};
    use crate::classifier::{FillColor, Tier};
    use crate::contracts::fetch_activity::{ActivityFetcher, FetchActivityError};
    use crate::data_transfer::fixtures::{event, record};
    use crate::data_transfer::ActivityLookup;
    use crate::detail_panel::{DetailPanel, Viewer};
    use crate::selection::{Interaction, SelectionState};
    use httpmock::prelude::*;
    use regions::{GovernorateName, RegionCatalog};
    use serde_json::json;
    use url::Url;

    fn view() -> HeatmapView {
        HeatmapView::new(RegionCatalog::load().unwrap())
    }

    fn name(value: &str) -> GovernorateName {
        GovernorateName::from(value)
    }

    fn assert_all_low(view: &HeatmapView) {
        assert_eq!(view.join().len(), 24);
        for region in view.join().iter() {
            assert_eq!(region.classification.tier, Tier::Low);
            assert_eq!(region.classification.color, FillColor::BLUE);
        }
    }

    #[test]
    fn test_that_the_view_renders_defaults_while_loading() {
        let view = view();

        assert!(view.is_loading());
        assert_eq!(view.status_line(), LOADING_MESSAGE);
        assert_eq!(view.render_map().features.len(), 24);
        assert_all_low(&view);
    }

    #[test]
    fn test_that_the_loading_indicator_goes_away_once_data_is_set() {
        let mut view = view();
        view.set_data(ActivityLookup::default(), None);

        assert_eq!(view.status_line(), "Showing nightlife activity levels");
    }

    #[test]
    fn test_that_failed_fetch_still_renders_every_governorate_as_low() {
        let mut view = view();
        view.finish_fetch(Err(FetchActivityError::DataUnavailable(anyhow::anyhow!("boom"))));

        assert!(!view.is_loading());
        assert_eq!(view.load_state(), &LoadState::Ready { fetched_at: None });
        assert!(view.lookup().is_empty());
        assert_eq!(view.month_label(), None);
        assert_all_low(&view);
    }

    #[tokio::test]
    async fn test_that_unsuccessful_api_response_renders_defaults() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/heatmap/");
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!({ "success": false, "data": [] }));
            })
            .await;
        let fetcher = ActivityFetcher::new(Url::parse(&server.base_url()).unwrap());

        let mut view = view();
        view.load(&fetcher).await;

        assert!(!view.is_loading());
        assert_all_low(&view);
    }

    #[tokio::test]
    async fn test_that_successful_load_colors_tunis_red() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/heatmap/");
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!({
                        "success": true,
                        "data": [{ "governorate": "Tunis", "score": 8, "color": "#ef4444", "events_count": 0, "events": [] }]
                    }));
            })
            .await;
        let fetcher = ActivityFetcher::new(Url::parse(&server.base_url()).unwrap());

        let mut view = view();
        view.load(&fetcher).await;

        mock.assert_hits_async(1).await;
        let tunis = view.join().get("Tunis").unwrap();
        assert_eq!(tunis.classification.tier, Tier::VeryHigh);
        assert_eq!(tunis.classification.color.as_str(), "#ef4444");
        assert!(view.month_label().is_some());
        assert!(view.header().starts_with("Showing nightlife activity levels for "));
    }

    #[test]
    fn test_that_selection_survives_data_replacement() {
        let mut view = view();
        view.select(&name("Sfax"));
        view.set_data(ActivityLookup::from_records(vec![record("Sfax", 6, vec![])]), None);
        view.set_data(ActivityLookup::from_records(vec![record("Gafsa", 1, vec![])]), None);

        assert_eq!(view.selection(), &SelectionState::Selected(name("Sfax")));
        // Data is replaced, not merged.
        assert_eq!(view.lookup().len(), 1);
        assert!(view.lookup().get("Sfax").is_none());
        assert_eq!(view.join().get("Sfax").unwrap().record.score, 0);
    }

    #[test]
    fn test_that_detail_panel_follows_the_last_click() {
        let mut view = view();
        view.set_data(
            ActivityLookup::from_records(vec![
                record("Ariana", 5, vec![event(1, "Garden Party")]),
                record("Manouba", 2, vec![]),
            ]),
            None,
        );

        assert_eq!(view.detail_panel(Viewer::Anonymous), DetailPanel::Prompt);

        view.handle(Interaction::Click, &name("Ariana"));
        view.handle(Interaction::Click, &name("Manouba"));

        let DetailPanel::Region(detail) = view.detail_panel(Viewer::Anonymous) else {
            panic!("expected region details");
        };
        assert_eq!(detail.name, name("Manouba"));
        assert_eq!(detail.score, 2);
    }

    #[test]
    fn test_that_clearing_selection_shows_the_prompt_again() {
        let mut view = view();
        view.select(&name("Kef"));
        view.clear_selection();

        assert_eq!(view.detail_panel(Viewer::SignedIn), DetailPanel::Prompt);
    }

    #[test]
    fn test_that_hovered_region_is_highlighted_in_the_rendered_map() {
        let mut view = view();
        view.handle(Interaction::HoverEnter, &name("Tozeur"));

        let collection = view.render_map();
        let tozeur = collection
            .features
            .iter()
            .find(|feature| feature.property("name").and_then(|v| v.as_str()) == Some("Tozeur"))
            .unwrap();
        let style = tozeur.property("style").unwrap();
        assert_eq!(style.get("weight").and_then(|w| w.as_u64()), Some(4));

        view.handle(Interaction::HoverExit, &name("Tozeur"));
        assert_eq!(view.hovered(), None);
    }

    #[test]
    fn test_legend_order() {
        let labels = view().legend().into_iter().map(|(label, _)| label).collect::<Vec<_>>();

        assert_eq!(labels, vec!["Low (0)", "Medium (1-3)", "High (4-6)", "Very High (7+)"]);
    }
}
