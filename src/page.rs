//! Static page chrome laid out on the terminal grid.
//!
//! The effects never read page content; the page exists so the cursor layer
//! has real elements to hover. Each region is one text row.

use crate::host::Element;

#[derive(Clone, Debug, PartialEq)]
pub struct Region {
    pub col: u16,
    pub row: u16,
    pub label: String,
    pub element: Element,
}

impl Region {
    fn new(col: u16, row: u16, label: &str, element: Element) -> Self {
        Self {
            col,
            row,
            label: label.to_string(),
            element,
        }
    }

    pub fn width(&self) -> u16 {
        self.label.chars().count() as u16
    }

    pub fn contains(&self, col: u16, row: u16) -> bool {
        row == self.row && col >= self.col && col < self.col.saturating_add(self.width())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Page {
    regions: Vec<Region>,
}

impl Page {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Portfolio landing layout for a `cols x rows` visual area.
    pub fn portfolio(cols: u16, rows: u16) -> Self {
        if cols < 24 || rows < 6 {
            return Self::empty();
        }
        let mut regions = Vec::new();

        let nav = [
            (" About ", Element::new("a")),
            (" Projects ", Element::new("a")),
            (" Skills ", Element::new("a")),
            (" Contact ", Element::new("button")),
        ];
        let mut col = 2u16;
        for (label, el) in nav {
            if col + label.len() as u16 >= cols {
                break;
            }
            regions.push(Region::new(col, 1, label, el));
            col += label.len() as u16 + 2;
        }

        let mid = rows / 2;
        let title = "Creative Developer";
        let center = |w: usize| cols.saturating_sub(w as u16) / 2;
        regions.push(Region::new(center(title.len()), mid.saturating_sub(2), title, Element::new("h1")));
        let tagline = "building things that glow";
        if rows > 8 {
            regions.push(Region::new(
                center(tagline.len()),
                mid.saturating_sub(1),
                tagline,
                Element::new("p"),
            ));
        }

        let cta = "[ View Work ]";
        let cv = "[ Resume ]";
        let total = cta.len() + 3 + cv.len();
        let start = center(total);
        regions.push(Region::new(start, mid + 1, cta, Element::new("div").with_role("button")));
        regions.push(Region::new(
            start + cta.len() as u16 + 3,
            mid + 1,
            cv,
            Element::new("span").with_class("cursor-pointer"),
        ));

        Self { regions }
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn hit(&self, col: u16, row: u16) -> Option<&Region> {
        self.regions.iter().find(|r| r.contains(col, row))
    }
}
