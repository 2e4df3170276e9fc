//! Capture layout — positions every visible element of a [`VisualDocument`].
//!
//! Coordinates are CSS pixels at the capture width; the rasterizer applies the
//! resolution scale. Sizes follow the preview stylesheet (Tailwind's type scale and
//! spacing steps), so a page laid out here has the same height as the on-screen
//! preview at that width. Text is wrapped with the Helvetica tables in
//! `font_metrics` and emitted as one box per line.

use crate::layout::font_metrics::{get_metrics, FontWeight};
use crate::models::LayoutKind;
use crate::render::{
    Block, ContactStyle, EntryView, Header, RegionRole, Section, SectionBody, SectionKind,
    VisualDocument,
};

pub type Rgb = [u8; 3];

pub const WHITE: Rgb = [255, 255, 255];
const PRIMARY: Rgb = [30, 58, 95];
const SECONDARY: Rgb = [61, 90, 128];
const DARK: Rgb = [31, 41, 55];
const GRAY_700: Rgb = [55, 65, 81];
const GRAY_600: Rgb = [75, 85, 99];
const GRAY_300: Rgb = [209, 213, 219];
const GRAY_100: Rgb = [243, 244, 246];
const CHIP_BG: Rgb = [216, 222, 230];

/// Viewport width at which the two-column layout switches from stacked to side by side.
pub const MD_BREAKPOINT_PX: f32 = 768.0;
/// 29.7cm at 96 dpi; the modern layout is never shorter than one A4 page.
pub const MODERN_MIN_HEIGHT_PX: f32 = 1123.0;
const REGION_PADDING: f32 = 32.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PaintKind {
    /// Solid rectangle: backgrounds, rules, chips, icons, bullet markers.
    Fill(Rgb),
    /// One wrapped line of text, drawn as a bar of the line's measured width.
    Text(Rgb),
    /// Circular photo from a `data:` URI.
    Photo(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaintItem {
    pub rect: Rect,
    pub kind: PaintKind,
}

/// Fully positioned document, ready to paint.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub width: f32,
    pub height: f32,
    pub items: Vec<PaintItem>,
}

#[derive(Debug, Clone, Copy)]
struct TextStyle {
    size: f32,
    line_height: f32,
    weight: FontWeight,
    color: Rgb,
}

const fn style(size: f32, line_height: f32, weight: FontWeight, color: Rgb) -> TextStyle {
    TextStyle {
        size,
        line_height,
        weight,
        color,
    }
}

const NAME_4XL: TextStyle = style(36.0, 40.0, FontWeight::Bold, PRIMARY);
const NAME_3XL: TextStyle = style(30.0, 36.0, FontWeight::Bold, PRIMARY);
const TITLE_XL: TextStyle = style(20.0, 28.0, FontWeight::Bold, SECONDARY);
const TITLE_LG: TextStyle = style(18.0, 28.0, FontWeight::Bold, SECONDARY);
const CONTACT: TextStyle = style(14.0, 20.0, FontWeight::Regular, GRAY_600);
const SECTION_TITLE: TextStyle = style(20.0, 28.0, FontWeight::Bold, PRIMARY);
const SIDEBAR_TITLE: TextStyle = style(18.0, 28.0, FontWeight::Bold, PRIMARY);
const ENTRY_HEADING: TextStyle = style(18.0, 28.0, FontWeight::Bold, DARK);
const ENTRY_DATES: TextStyle = style(14.0, 20.0, FontWeight::Regular, GRAY_600);
const ENTRY_SUBHEADING: TextStyle = style(16.0, 24.0, FontWeight::Regular, SECONDARY);
const BODY: TextStyle = style(16.0, 24.0, FontWeight::Regular, GRAY_700);
const BODY_SM: TextStyle = style(14.0, 20.0, FontWeight::Regular, GRAY_700);
const CHIP: TextStyle = style(14.0, 20.0, FontWeight::Regular, PRIMARY);
const CHIP_XS: TextStyle = style(12.0, 16.0, FontWeight::Regular, PRIMARY);

#[derive(Debug, Clone, Copy, PartialEq)]
enum Align {
    Left,
    Center,
    Right,
}

/// Lays out `doc` at `width` CSS pixels for a viewport `window_width` pixels wide.
pub fn layout_document(doc: &VisualDocument, width: f32, window_width: f32) -> PageLayout {
    let side_by_side = window_width >= MD_BREAKPOINT_PX;
    let mut items = Vec::new();
    let mut backgrounds = Vec::new();
    let mut height = 0.0_f32;
    let mut x = 0.0_f32;
    let mut stacked_top = 0.0_f32;

    for region in &doc.regions {
        let (region_x, region_y, region_width) = if side_by_side {
            (x, 0.0, width * region.width_fraction)
        } else {
            (0.0, stacked_top, width)
        };

        let mut flow = Flow {
            items: &mut items,
            x: region_x + REGION_PADDING,
            width: region_width - 2.0 * REGION_PADDING,
            y: region_y + REGION_PADDING,
            sidebar: region.role == RegionRole::Sidebar,
        };
        for block in &region.blocks {
            flow.block(block);
        }
        let region_bottom = flow.y + REGION_PADDING;

        if region.role == RegionRole::Sidebar {
            backgrounds.push((region_x, region_y, region_width, region_bottom));
        }
        height = height.max(region_bottom);
        x += region_width;
        stacked_top = region_bottom;
    }

    if doc.layout == LayoutKind::Modern {
        height = height.max(MODERN_MIN_HEIGHT_PX);
    }
    let height = height.ceil();

    // Side-by-side sidebars stretch to the full document height.
    let mut painted: Vec<PaintItem> = backgrounds
        .into_iter()
        .map(|(bx, by, bw, bottom)| PaintItem {
            rect: Rect {
                x: bx,
                y: by,
                w: bw,
                h: if side_by_side { height } else { bottom - by },
            },
            kind: PaintKind::Fill(GRAY_100),
        })
        .collect();
    painted.extend(items);

    PageLayout {
        width,
        height,
        items: painted,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Flow
// ────────────────────────────────────────────────────────────────────────────

struct Flow<'a> {
    items: &'a mut Vec<PaintItem>,
    x: f32,
    width: f32,
    y: f32,
    sidebar: bool,
}

impl Flow<'_> {
    fn block(&mut self, block: &Block) {
        match block {
            Block::Header(header) => match header.contact_style {
                ContactStyle::Inline => self.inline_header(header),
                ContactStyle::Stacked => self.stacked_header(header),
            },
            Block::Section(section) => self.section(section),
        }
    }

    fn fill(&mut self, rect: Rect, color: Rgb) {
        self.items.push(PaintItem {
            rect,
            kind: PaintKind::Fill(color),
        });
    }

    fn photo(&mut self, uri: &str, x: f32, y: f32, size: f32) {
        self.items.push(PaintItem {
            rect: Rect {
                x,
                y,
                w: size,
                h: size,
            },
            kind: PaintKind::Photo(uri.to_string()),
        });
    }

    /// Emits wrapped lines of `text` into the box starting at (`x`, `y`). Returns the height used.
    fn lines_at(&mut self, text: &str, st: TextStyle, x: f32, y: f32, width: f32, align: Align) -> f32 {
        let metrics = get_metrics(st.weight);
        let max_em = (width / st.size).max(0.0);
        let lines = metrics.wrap_lines(text, max_em);
        let bar_h = (st.size * 0.55).max(1.0);

        for (i, em) in lines.iter().enumerate() {
            let w = (em * st.size).min(width);
            let lx = match align {
                Align::Left => x,
                Align::Center => x + (width - w) / 2.0,
                Align::Right => x + width - w,
            };
            let ly = y + i as f32 * st.line_height + (st.line_height - bar_h) / 2.0;
            self.items.push(PaintItem {
                rect: Rect {
                    x: lx,
                    y: ly,
                    w,
                    h: bar_h,
                },
                kind: PaintKind::Text(st.color),
            });
        }
        lines.len() as f32 * st.line_height
    }

    /// Flows `text` at the cursor across the full column width.
    fn text(&mut self, text: &str, st: TextStyle, align: Align) {
        let (x, y, w) = (self.x, self.y, self.width);
        self.y += self.lines_at(text, st, x, y, w, align);
    }

    fn rule(&mut self, thickness: f32, color: Rgb) {
        let rect = Rect {
            x: self.x,
            y: self.y,
            w: self.width,
            h: thickness,
        };
        self.fill(rect, color);
        self.y += thickness;
    }

    // ── header ──────────────────────────────────────────────────────────────

    fn inline_header(&mut self, header: &Header) {
        const PHOTO: f32 = 128.0;
        const GAP: f32 = 24.0;

        let top = self.y;
        let (text_x, text_w) = match &header.photo {
            Some(uri) => {
                self.photo(uri, self.x, top, PHOTO);
                (self.x + PHOTO + GAP, self.width - PHOTO - GAP)
            }
            None => (self.x, self.width),
        };

        let mut y = top;
        y += self.lines_at(&header.name, NAME_4XL, text_x, y, text_w, Align::Left);
        y += 4.0;
        y += self.lines_at(&header.title, TITLE_XL, text_x, y, text_w, Align::Left);

        if !header.contacts.is_empty() {
            y += 16.0;
            y += self.contact_row(header, text_x, y, text_w);
        }

        let photo_h = if header.photo.is_some() { PHOTO } else { 0.0 };
        self.y = top + (y - top).max(photo_h);
        self.y += 16.0;
        self.rule(2.0, PRIMARY);
        self.y += 32.0;
    }

    /// Wrapping row of icon + text contacts. Returns the height used.
    fn contact_row(&mut self, header: &Header, x: f32, y: f32, width: f32) -> f32 {
        const ICON: f32 = 16.0;
        const ICON_GAP: f32 = 8.0;
        const GAP_X: f32 = 24.0;
        const GAP_Y: f32 = 8.0;

        let metrics = get_metrics(CONTACT.weight);
        let mut cx = x;
        let mut cy = y;
        for item in &header.contacts {
            let text_w = (metrics.measure_str(&item.text) * CONTACT.size).min(width - ICON - ICON_GAP);
            let item_w = ICON + ICON_GAP + text_w;
            if cx > x && cx + item_w > x + width {
                cx = x;
                cy += CONTACT.line_height + GAP_Y;
            }
            self.fill(
                Rect {
                    x: cx,
                    y: cy + (CONTACT.line_height - ICON) / 2.0,
                    w: ICON,
                    h: ICON,
                },
                GRAY_600,
            );
            self.lines_at(&item.text, CONTACT, cx + ICON + ICON_GAP, cy, text_w + 1.0, Align::Left);
            cx += item_w + GAP_X;
        }
        cy + CONTACT.line_height - y
    }

    fn stacked_header(&mut self, header: &Header) {
        const PHOTO: f32 = 160.0;
        const ICON: f32 = 16.0;
        const ICON_GAP: f32 = 8.0;

        if let Some(uri) = &header.photo {
            let px = self.x + (self.width - PHOTO) / 2.0;
            self.photo(uri, px, self.y, PHOTO);
            self.y += PHOTO + 24.0;
        }
        self.text(&header.name, NAME_3XL, Align::Center);
        self.y += 4.0;
        self.text(&header.title, TITLE_LG, Align::Center);
        self.y += 32.0;

        for (i, item) in header.contacts.iter().enumerate() {
            if i > 0 {
                self.y += 12.0;
            }
            let icon = Rect {
                x: self.x,
                y: self.y + (CONTACT.line_height - ICON) / 2.0,
                w: ICON,
                h: ICON,
            };
            self.fill(icon, GRAY_600);
            let (x, y, w) = (self.x + ICON + ICON_GAP, self.y, self.width - ICON - ICON_GAP);
            let used = self.lines_at(&item.text, CONTACT, x, y, w, Align::Left);
            self.y += used.max(CONTACT.line_height);
        }
    }

    // ── sections ────────────────────────────────────────────────────────────

    fn section(&mut self, section: &Section) {
        if self.sidebar {
            self.y += 32.0;
            self.text(&section.title, SIDEBAR_TITLE, Align::Left);
        } else {
            self.text(&section.title, SECTION_TITLE, Align::Left);
        }
        self.y += 4.0;
        self.rule(1.0, GRAY_300);
        self.y += 8.0;

        match &section.body {
            SectionBody::Paragraph(text) => {
                let st = if self.sidebar { BODY_SM } else { BODY };
                self.text(text, st, Align::Left);
            }
            SectionBody::Entries(entries) => {
                let gap = if section.kind == SectionKind::Courses { 8.0 } else { 16.0 };
                for entry in entries {
                    self.entry(entry);
                    self.y += gap;
                }
            }
            SectionBody::Chips(chips) => self.chips(chips),
        }

        if !self.sidebar {
            self.y += 24.0;
        }
    }

    fn entry(&mut self, entry: &EntryView) {
        const DATES_GAP: f32 = 16.0;
        const LIST_INDENT: f32 = 8.0;
        const MARKER: f32 = 5.0;
        const MARKER_GAP: f32 = 15.0;

        let dates_w = if entry.dates.trim().is_empty() {
            0.0
        } else {
            (get_metrics(ENTRY_DATES.weight).measure_str(&entry.dates) * ENTRY_DATES.size)
                .min(self.width / 2.0)
        };

        let top = self.y;
        let heading_w = (self.width - dates_w - DATES_GAP).max(0.0);
        let heading_h = self.lines_at(&entry.heading, ENTRY_HEADING, self.x, top, heading_w, Align::Left);
        if dates_w > 0.0 {
            // Baseline-aligned with the first heading line.
            let dy = top + (ENTRY_HEADING.line_height - ENTRY_DATES.line_height);
            self.lines_at(&entry.dates, ENTRY_DATES, self.x, dy, self.width, Align::Right);
        }
        let row_h = if dates_w > 0.0 {
            heading_h.max(ENTRY_HEADING.line_height)
        } else {
            heading_h
        };
        self.y = top + row_h;

        self.text(&entry.subheading, ENTRY_SUBHEADING, Align::Left);

        if !entry.bullets.is_empty() {
            self.y += 4.0;
            let marker_x = self.x + LIST_INDENT;
            let text_x = marker_x + MARKER + MARKER_GAP;
            let text_w = (self.width - (text_x - self.x)).max(0.0);
            for bullet in &entry.bullets {
                self.fill(
                    Rect {
                        x: marker_x,
                        y: self.y + (BODY.line_height - MARKER) / 2.0,
                        w: MARKER,
                        h: MARKER,
                    },
                    GRAY_700,
                );
                let y = self.y;
                let used = self.lines_at(bullet, BODY, text_x, y, text_w, Align::Left);
                self.y += used.max(BODY.line_height);
            }
        }
    }

    fn chips(&mut self, chips: &[String]) {
        const GAP: f32 = 8.0;
        const PAD_Y: f32 = 4.0;

        let (st, pad_x) = if self.sidebar { (CHIP_XS, 8.0) } else { (CHIP, 12.0) };
        let metrics = get_metrics(st.weight);
        let chip_h = st.line_height + 2.0 * PAD_Y;

        self.y += 8.0;
        let mut cx = self.x;
        let mut cy = self.y;
        for chip in chips {
            let text_w = (metrics.measure_str(chip) * st.size).min(self.width - 2.0 * pad_x);
            let chip_w = text_w + 2.0 * pad_x;
            if cx > self.x && cx + chip_w > self.x + self.width {
                cx = self.x;
                cy += chip_h + GAP;
            }
            self.fill(
                Rect {
                    x: cx,
                    y: cy,
                    w: chip_w,
                    h: chip_h,
                },
                CHIP_BG,
            );
            self.lines_at(chip, st, cx + pad_x, cy + PAD_Y, text_w + 1.0, Align::Left);
            cx += chip_w + GAP;
        }
        if !chips.is_empty() {
            self.y = cy + chip_h;
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CvData, EntryField, EntryKind};
    use crate::render::render;

    fn text_items(layout: &PageLayout) -> usize {
        layout
            .items
            .iter()
            .filter(|i| matches!(i.kind, PaintKind::Text(_)))
            .count()
    }

    #[test]
    fn test_items_stay_inside_page_width() {
        let doc = render(&CvData::sample(), LayoutKind::Classic);
        let layout = layout_document(&doc, 1056.0, 1200.0);
        for item in &layout.items {
            assert!(item.rect.x >= 0.0);
            assert!(item.rect.x + item.rect.w <= layout.width + 0.5, "{item:?}");
            assert!(item.rect.y + item.rect.h <= layout.height + 0.5);
        }
    }

    #[test]
    fn test_more_bullets_make_a_taller_page() {
        let mut cv = CvData::sample();
        let short = layout_document(&render(&cv, LayoutKind::Classic), 1056.0, 1200.0);

        let id = cv.add_entry(EntryKind::Experience);
        let long_description = "Delivered a measurable improvement.\n".repeat(30);
        cv.update_entry_field(EntryKind::Experience, &id, EntryField::Description, long_description)
            .unwrap();
        let tall = layout_document(&render(&cv, LayoutKind::Classic), 1056.0, 1200.0);

        assert!(tall.height > short.height);
        assert!(text_items(&tall) >= text_items(&short) + 30);
    }

    #[test]
    fn test_modern_is_at_least_one_a4_page_tall() {
        let mut cv = CvData::default();
        cv.summary = "Short.".to_string();
        let layout = layout_document(&render(&cv, LayoutKind::Modern), 1056.0, 1200.0);
        assert!(layout.height >= MODERN_MIN_HEIGHT_PX);
        // Sidebar background spans the full height.
        let PaintItem { rect, kind } = &layout.items[0];
        assert_eq!(*kind, PaintKind::Fill(GRAY_100));
        assert_eq!(rect.h, layout.height);
    }

    #[test]
    fn test_narrow_window_stacks_regions() {
        let doc = render(&CvData::sample(), LayoutKind::Modern);
        let wide = layout_document(&doc, 1056.0, 1200.0);
        let narrow = layout_document(&doc, 1056.0, 600.0);
        // Stacked: sidebar spans the full width.
        assert_eq!(narrow.items[0].rect.w, 1056.0);
        assert!(wide.items[0].rect.w < 1056.0);
    }

    #[test]
    fn test_photo_is_placed_when_present() {
        let mut cv = CvData::sample();
        cv.personal_info.photo = Some("data:image/png;base64,AAAA".to_string());
        for kind in [LayoutKind::Classic, LayoutKind::Modern] {
            let layout = layout_document(&render(&cv, kind), 1056.0, 1200.0);
            let photos = layout
                .items
                .iter()
                .filter(|i| matches!(i.kind, PaintKind::Photo(_)))
                .count();
            assert_eq!(photos, 1);
        }
    }

    #[test]
    fn test_layout_is_deterministic() {
        let doc = render(&CvData::sample(), LayoutKind::Modern);
        assert_eq!(
            layout_document(&doc, 1056.0, 1200.0),
            layout_document(&doc, 1056.0, 1200.0)
        );
    }
}
