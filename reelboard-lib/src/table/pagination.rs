//! Pagination control layout.

/// Pages shown on each side of the current page.
const WINDOW: usize = 2;

/// One element of the pagination bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageControl {
    First { enabled: bool },
    Prev { enabled: bool },
    Page { number: usize, current: bool },
    Ellipsis,
    Next { enabled: bool },
    Last { enabled: bool },
}

impl PageControl {
    /// The page this control navigates to, when clickable.
    ///
    /// Arrows that would leave `1..=total` have no target, whatever their
    /// `enabled` flag says.
    pub fn target(&self, current: usize, total: usize) -> Option<usize> {
        match *self {
            Self::First { enabled: true } if total > 0 => Some(1),
            Self::Prev { enabled: true } if current > 1 => Some((current - 1).min(total)),
            Self::Page { number, current: false } => Some(number),
            Self::Next { enabled: true } if current < total => Some(current + 1),
            Self::Last { enabled: true } if total > 0 => Some(total),
            _ => None,
        }
    }
}

/// Pagination bar for a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationBar {
    pub current: usize,
    pub total: usize,
    pub controls: Vec<PageControl>,
}

impl PaginationBar {
    /// Lays out the controls for `current` of `total` pages.
    ///
    /// Navigation arrows are always present and disabled at the edges.
    /// Page numbers cover the first and last page plus two pages either
    /// side of the current one; gaps collapse into an ellipsis.
    pub fn new(current: usize, total: usize) -> Self {
        let mut controls = vec![
            PageControl::First {
                enabled: current > 1,
            },
            PageControl::Prev {
                enabled: current > 1,
            },
        ];

        let mut previous = 0;
        for number in visible_pages(current, total) {
            if number > previous + 1 {
                controls.push(PageControl::Ellipsis);
            }
            controls.push(PageControl::Page {
                number,
                current: number == current,
            });
            previous = number;
        }

        controls.push(PageControl::Next {
            enabled: current < total,
        });
        controls.push(PageControl::Last {
            enabled: current < total,
        });

        Self {
            current,
            total,
            controls,
        }
    }

    /// Page numbers shown, in order.
    pub fn page_numbers(&self) -> Vec<usize> {
        self.controls
            .iter()
            .filter_map(|control| match control {
                PageControl::Page { number, .. } => Some(*number),
                _ => None,
            })
            .collect()
    }
}

fn visible_pages(current: usize, total: usize) -> Vec<usize> {
    if total == 0 {
        return Vec::new();
    }
    let low = current.saturating_sub(WINDOW).max(1);
    let high = (current + WINDOW).min(total);

    let mut pages = Vec::with_capacity(2 * WINDOW + 3);
    if low > 1 {
        pages.push(1);
    }
    pages.extend(low..=high);
    if high < total {
        pages.push(total);
    }
    pages
}
