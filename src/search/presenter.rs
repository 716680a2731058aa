use serde::Serialize;
use uuid::Uuid;

use super::models::Package;
use super::session::{InterestResults, SearchState};

pub const PAGE_SIZE: usize = 6;

pub const EMPTY_RESULTS_MESSAGE: &str =
    "No search results yet. Click the search button on an interest to find matching packages.";

/// One page out of a group's result list.
#[derive(Debug, Clone, Serialize)]
pub struct PackagePage {
    pub items: Vec<Package>,
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub total_pages: usize,
}

/// A group of results for one interest, shaped for the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct ResultGroup {
    pub interest_id: Uuid,
    pub locations_text: String,
    pub state: SearchState,
    pub packages: PackagePage,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResultsResponse {
    pub groups: Vec<ResultGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// How a group's packages are cut for the response. `Paged` serves a fixed
/// window; `Scroll` serves everything and leaves chunking to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultsView {
    Paged { page: usize },
    Scroll,
}

impl ResultsView {
    /// `view=scroll` switches modes; any other value falls back to paging.
    pub fn from_query(view: Option<&str>, page: Option<usize>) -> Self {
        match view {
            Some("scroll") => ResultsView::Scroll,
            _ => ResultsView::Paged {
                page: page.unwrap_or(1).max(1),
            },
        }
    }
}

/// Cuts a package list into a 1-based page of `PAGE_SIZE` items. Pages past
/// the end come back empty rather than erroring, with the totals intact so
/// the client can correct itself.
pub fn paginate(packages: &[Package], page: usize) -> PackagePage {
    let total = packages.len();
    let total_pages = total.div_ceil(PAGE_SIZE);
    let page = page.max(1);
    let start = (page - 1).saturating_mul(PAGE_SIZE);
    let items = packages
        .iter()
        .skip(start)
        .take(PAGE_SIZE)
        .cloned()
        .collect();

    PackagePage {
        items,
        page,
        per_page: PAGE_SIZE,
        total,
        total_pages,
    }
}

fn present_group(group: InterestResults, view: ResultsView) -> ResultGroup {
    let packages = match view {
        ResultsView::Paged { page } => paginate(&group.packages, page),
        ResultsView::Scroll => PackagePage {
            page: 1,
            per_page: group.packages.len().max(1),
            total: group.packages.len(),
            total_pages: 1,
            items: group.packages,
        },
    };

    ResultGroup {
        interest_id: group.interest_id,
        locations_text: group.locations_text,
        state: group.state,
        packages,
    }
}

/// Shapes a session snapshot into the dashboard response. An empty snapshot
/// carries the guidance message instead of groups.
pub fn present_results(snapshot: Vec<InterestResults>, view: ResultsView) -> ResultsResponse {
    if snapshot.is_empty() {
        return ResultsResponse {
            groups: Vec::new(),
            message: Some(EMPTY_RESULTS_MESSAGE.to_string()),
        };
    }

    ResultsResponse {
        groups: snapshot
            .into_iter()
            .map(|group| present_group(group, view))
            .collect(),
        message: None,
    }
}

pub fn present_single(group: InterestResults, view: ResultsView) -> ResultGroup {
    present_group(group, view)
}
