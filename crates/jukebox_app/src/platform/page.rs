use clap::ArgMatches;
use jukebox_core::PageInfo;
use jukebox_engine::PageSource;

/// The "active page" handed over on the command line.
pub struct ArgPageSource {
    page: Option<PageInfo>,
}

impl ArgPageSource {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        let page = matches.get_one::<String>("url").map(|url| {
            PageInfo::new(url.clone(), matches.get_one::<String>("title").cloned())
        });
        Self { page }
    }

    pub fn none() -> Self {
        Self { page: None }
    }
}

#[async_trait::async_trait]
impl PageSource for ArgPageSource {
    async fn active_page(&self) -> Option<PageInfo> {
        self.page.clone()
    }
}
