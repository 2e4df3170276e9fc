// Modern layout: identity, summary and skills in a narrow sidebar; history in the main column.

use crate::models::CvData;
use crate::render::blocks;
use crate::render::{ContactStyle, Region, RegionRole};

const SIDEBAR_FRACTION: f32 = 1.0 / 3.0;

pub(super) fn regions(cv: &CvData) -> Vec<Region> {
    let mut sidebar = vec![blocks::header(&cv.personal_info, ContactStyle::Stacked)];
    sidebar.extend([blocks::summary(cv), blocks::skills(cv)].into_iter().flatten());

    let main: Vec<_> = [
        blocks::experience(cv),
        blocks::education(cv),
        blocks::courses(cv),
    ]
    .into_iter()
    .flatten()
    .collect();

    vec![
        Region {
            role: RegionRole::Sidebar,
            width_fraction: SIDEBAR_FRACTION,
            blocks: sidebar,
        },
        Region {
            role: RegionRole::Main,
            width_fraction: 1.0 - SIDEBAR_FRACTION,
            blocks: main,
        },
    ]
}
