//! Page arithmetic for the list view. Clamping lives here, not in the repository.

/// `ceil(total / page_size)`; zero when there are no rows.
pub fn total_pages(total: u64, page_size: u32) -> u32 {
    let pages = total.div_ceil(u64::from(page_size.max(1)));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Lenient `page` parameter parsing: anything unusable means page 1.
pub fn parse_page(raw: Option<&str>) -> u32 {
    raw.and_then(|p| p.trim().parse::<i64>().ok())
        .map_or(1, |p| u32::try_from(p.max(1)).unwrap_or(u32::MAX))
}

/// Pulls a requested page into `[1, total_pages]` (page 1 for an empty listing).
pub fn clamp_page(requested: u32, total_pages: u32) -> u32 {
    if requested < 1 || total_pages == 0 {
        1
    } else if requested > total_pages {
        total_pages
    } else {
        requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 15), 0);
        assert_eq!(total_pages(1, 15), 1);
        assert_eq!(total_pages(15, 15), 1);
        assert_eq!(total_pages(16, 15), 2);
    }

    #[test]
    fn out_of_range_pages_are_clamped() {
        assert_eq!(clamp_page(0, 4), 1);
        assert_eq!(clamp_page(9, 4), 4);
        assert_eq!(clamp_page(3, 4), 3);
        assert_eq!(clamp_page(5, 0), 1);
    }

    #[test]
    fn unparsable_pages_fall_back_to_first() {
        assert_eq!(parse_page(None), 1);
        assert_eq!(parse_page(Some("abc")), 1);
        assert_eq!(parse_page(Some("-3")), 1);
        assert_eq!(parse_page(Some(" 7 ")), 7);
    }
}
