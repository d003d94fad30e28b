use community::contracts::login::LoginInteractor;
use community::contracts::register::RegisterInteractor;
use community::contracts::suggest_event::SuggestEventInteractor;
use heatmap::ActivityFetcher;
use regions::RegionCatalog;
use url::Url;

pub struct Application {
    pub catalog: RegionCatalog,
    pub fetcher: ActivityFetcher,
    pub login: LoginInteractor,
    pub register: RegisterInteractor,
    pub suggest_event: SuggestEventInteractor,
}

impl Application {
    pub fn new(api_base: Url) -> anyhow::Result<Self> {
        Ok(Application {
            catalog: RegionCatalog::load()?,
            fetcher: ActivityFetcher::new(api_base.clone()),
            login: LoginInteractor::new(api_base.clone()),
            register: RegisterInteractor::new(api_base.clone()),
            suggest_event: SuggestEventInteractor::new(api_base),
        })
    }
}
