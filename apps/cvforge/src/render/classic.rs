// Classic layout: a single flowing column.

use crate::models::CvData;
use crate::render::blocks;
use crate::render::{ContactStyle, Region, RegionRole};

pub(super) fn regions(cv: &CvData) -> Vec<Region> {
    let mut blocks = vec![blocks::header(&cv.personal_info, ContactStyle::Inline)];
    blocks.extend(
        [
            blocks::summary(cv),
            blocks::experience(cv),
            blocks::education(cv),
            blocks::courses(cv),
            blocks::skills(cv),
        ]
        .into_iter()
        .flatten(),
    );

    vec![Region {
        role: RegionRole::Main,
        width_fraction: 1.0,
        blocks,
    }]
}
