use crate::blank::is_blank;
use crate::layout::LayoutConfig;
use crate::options::NupOptions;
use crate::source::SourceDocument;
use crate::types::*;

/// Calculate statistics for combining `source` with `options`.
///
/// Runs blank detection over every page but renders nothing.
pub fn calculate_statistics(
    source: &SourceDocument,
    options: &NupOptions,
) -> Result<NupStatistics> {
    let config = LayoutConfig::from_options(options)?;

    let source_pages = source.page_count();
    if source_pages == 0 {
        return Err(NupError::NoPages);
    }

    let mut blank_pages = 0;
    let mut unreadable_pages = 0;
    for page in source.pages() {
        match is_blank(&page) {
            Ok(true) => blank_pages += 1,
            Ok(false) => {}
            Err(_) => unreadable_pages += 1,
        }
    }

    let output_pages = config.group_count(source_pages);
    let trailing_empty_slots = output_pages * config.mini_pages_per_page - source_pages;

    Ok(NupStatistics {
        source_pages,
        output_pages,
        blank_pages,
        unreadable_pages,
        trailing_empty_slots,
    })
}
