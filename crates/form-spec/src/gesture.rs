/// Remembers the single row a drag gesture started from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragState {
    source: Option<usize>,
}

impl DragState {
    pub fn begin(&mut self, index: usize) {
        self.source = Some(index);
    }

    /// Resolves a drop into a `(from, to)` pair and forgets the source;
    /// `None` when no drag is in progress.
    pub fn take_drop(&mut self, target: usize) -> Option<(usize, usize)> {
        self.source.take().map(|source| (source, target))
    }

    pub fn source(&self) -> Option<usize> {
        self.source
    }
}

/// One deferred focus request, drained by the view after its next render
/// pass. A request is not cancellable; a newer one replaces an undrained
/// one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeferredFocus {
    pending: Option<usize>,
}

impl DeferredFocus {
    pub fn request(&mut self, index: usize) {
        self.pending = Some(index);
    }

    pub fn take(&mut self) -> Option<usize> {
        self.pending.take()
    }
}
