/// Regions of the view that are shown or hidden as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    Empty,
    Loading,
    Result,
}

/// Text targets inside the panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Loading,
    Price,
    RangeLow,
    /// Fill of the confidence band bar, as a percentage such as `"100%"`.
    BandFill,
    RangeHigh,
    Summary,
    Chart,
}

/// Narrow surface the view controller renders into.
pub trait DisplaySink {
    fn set_text(&mut self, slot: Slot, text: &str);
    fn set_visible(&mut self, panel: Panel, visible: bool);
}

impl<S: DisplaySink + ?Sized> DisplaySink for &mut S {
    fn set_text(&mut self, slot: Slot, text: &str) {
        (**self).set_text(slot, text);
    }

    fn set_visible(&mut self, panel: Panel, visible: bool) {
        (**self).set_visible(panel, visible);
    }
}
