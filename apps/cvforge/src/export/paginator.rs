//! Page-band planning: splits a tall raster into consecutive page-sized slices.
//!
//! The raster is scaled to the full page width, so one page holds
//! `raster_width × page_height / page_width` raster rows. Bands are planned in
//! raster rows: band k covers rows `[k·P, min((k+1)·P, H))`. Every row lands on
//! exactly one page; nothing is duplicated or skipped at a page boundary.

use serde::Serialize;

const MM_PER_INCH: f32 = 25.4;
const PT_PER_INCH: f32 = 72.0;

/// Physical page size of the output document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageGeometry {
    pub width_mm: f32,
    pub height_mm: f32,
}

impl PageGeometry {
    pub const fn a4_portrait() -> Self {
        PageGeometry {
            width_mm: 210.0,
            height_mm: 297.0,
        }
    }

    pub fn width_pt(&self) -> f32 {
        self.width_mm / MM_PER_INCH * PT_PER_INCH
    }

    pub fn height_pt(&self) -> f32 {
        self.height_mm / MM_PER_INCH * PT_PER_INCH
    }

    /// Raster rows that fill one page when a raster `raster_width` pixels wide is
    /// scaled to the page width.
    pub fn page_height_px(&self, raster_width: u32) -> u32 {
        (f64::from(raster_width) * f64::from(self.height_mm) / f64::from(self.width_mm)).round()
            as u32
    }
}

/// One horizontal slice of the raster, destined for one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageBand {
    pub index: usize,
    /// First raster row of the band.
    pub top: u32,
    pub height: u32,
}

/// Plans `ceil(raster_height / page_height)` contiguous bands.
///
/// Returns no bands for an empty raster or a zero page height.
pub fn plan_bands(raster_height: u32, page_height: u32) -> Vec<PageBand> {
    if page_height == 0 {
        return Vec::new();
    }

    let mut bands = Vec::new();
    let mut top = 0u32;
    while top < raster_height {
        let height = page_height.min(raster_height - top);
        bands.push(PageBand {
            index: bands.len(),
            top,
            height,
        });
        top += height;
    }
    bands
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_3000_rows_at_1200_is_three_pages() {
        let bands = plan_bands(3000, 1200);
        let heights: Vec<u32> = bands.iter().map(|b| b.height).collect();
        assert_eq!(heights, vec![1200, 1200, 600]);
        let tops: Vec<u32> = bands.iter().map(|b| b.top).collect();
        assert_eq!(tops, vec![0, 1200, 2400]);
    }

    #[test]
    fn test_exact_multiple_has_no_trailing_empty_page() {
        let bands = plan_bands(2400, 1200);
        assert_eq!(bands.len(), 2);
        assert_eq!(bands[1].height, 1200);
    }

    #[test]
    fn test_short_raster_is_single_page() {
        let bands = plan_bands(500, 1200);
        assert_eq!(
            bands,
            vec![PageBand {
                index: 0,
                top: 0,
                height: 500
            }]
        );
    }

    #[test]
    fn test_degenerate_inputs_yield_no_bands() {
        assert!(plan_bands(0, 1200).is_empty());
        assert!(plan_bands(3000, 0).is_empty());
    }

    #[test]
    fn test_bands_are_contiguous_and_cover_every_row() {
        for page in [1u32, 7, 100, 1123, 2987] {
            for height in [1u32, 99, 100, 101, 1122, 1124, 5000, 9001] {
                let bands = plan_bands(height, page);
                let expected = height.div_ceil(page) as usize;
                assert_eq!(bands.len(), expected, "H={height} P={page}");

                let mut next = 0u32;
                for (k, band) in bands.iter().enumerate() {
                    assert_eq!(band.index, k);
                    assert_eq!(band.top, k as u32 * page);
                    assert_eq!(band.top, next, "gap or overlap at band {k}");
                    assert_eq!(band.height, page.min(height - band.top));
                    next = band.top + band.height;
                }
                assert_eq!(next, height);
            }
        }
    }

    #[test]
    fn test_a4_geometry() {
        let a4 = PageGeometry::a4_portrait();
        assert!((a4.width_pt() - 595.28).abs() < 0.01);
        assert!((a4.height_pt() - 841.89).abs() < 0.01);
        // 1056 CSS px at 2x → 2112 px wide raster.
        assert_eq!(a4.page_height_px(2112), 2987);
    }
}
