//! Host-facing snap line plugin.
//!
//! [`SnapLine`] ties the pieces together: it subscribes to drag events on the
//! host's [`EventBus`], runs a [`DragSession`] per drag, and keeps the guide
//! lines on the canvas in sync with the selected alignments.

use crate::camera::Viewport;
use crate::candidate::CandidateGenerator;
use crate::events::{DragPhase, ElementDragEvent, EventBus, EventName, ListenerId};
use crate::graph::{BoundsProvider, ElementType, GraphModel};
use crate::guide::{GuideCanvas, GuideLines, ReconcileStats};
use crate::options::{OptionsResult, PartialSnapLineOptions, SnapLineOptions};
use crate::session::DragSession;

/// Collaborators a drag event is handled against.
pub struct RuntimeContext<'a, G: ?Sized, V: ?Sized, C> {
    /// Graph data and element bounds.
    pub graph: &'a G,
    /// Zoom source for pointer deltas.
    pub viewport: &'a V,
    /// Canvas holding the guide line primitives.
    pub canvas: &'a mut C,
}

impl<'a, G: ?Sized, V: ?Sized, C> RuntimeContext<'a, G, V, C> {
    pub fn new(graph: &'a G, viewport: &'a V, canvas: &'a mut C) -> Self {
        Self {
            graph,
            viewport,
            canvas,
        }
    }
}

/// Alignment guide lines for dragged nodes and combos.
pub struct SnapLine<C: GuideCanvas> {
    options: SnapLineOptions,
    generator: CandidateGenerator,
    session: DragSession,
    lines: GuideLines<C::Handle>,
    /// Bus subscription; `None` once destroyed.
    listener: Option<ListenerId>,
}

impl<C: GuideCanvas> SnapLine<C> {
    /// Validate `options` and subscribe to drag events of every enabled element type.
    pub fn new(options: SnapLineOptions, bus: &mut EventBus) -> OptionsResult<Self> {
        options.validate()?;
        let listener = bus.register();
        bind(bus, listener, &options.enable_elements);
        Ok(Self {
            generator: options.generator(),
            options,
            session: DragSession::new(),
            lines: GuideLines::new(),
            listener: Some(listener),
        })
    }

    pub fn options(&self) -> &SnapLineOptions {
        &self.options
    }

    pub fn session(&self) -> &DragSession {
        &self.session
    }

    /// Guide lines currently on the canvas.
    pub fn lines(&self) -> &GuideLines<C::Handle> {
        &self.lines
    }

    /// Bus subscription id, `None` after [`SnapLine::destroy`].
    pub fn listener(&self) -> Option<ListenerId> {
        self.listener
    }

    pub fn is_destroyed(&self) -> bool {
        self.listener.is_none()
    }

    /// Merge `partial` into the options.
    ///
    /// Invalid results are rejected and the previous options stay in effect.
    /// When the enabled element types change, events are rebound and any
    /// drag in progress is dropped together with its guide lines.
    pub fn update(
        &mut self,
        partial: PartialSnapLineOptions,
        bus: &mut EventBus,
        canvas: &mut C,
    ) -> OptionsResult<()> {
        let options = self.options.merged(partial);
        if let Err(err) = options.validate() {
            log::warn!("snapline: rejected options update: {}", err);
            return Err(err);
        }

        if !same_element_types(&options.enable_elements, &self.options.enable_elements) {
            if let Some(listener) = self.listener {
                bus.off_all(listener);
                bind(bus, listener, &options.enable_elements);
            }
            self.session.reset();
            self.lines.clear(canvas);
        }

        self.generator = options.generator();
        self.options = options;
        Ok(())
    }

    /// Unsubscribe from the bus and detach all guide lines.
    pub fn destroy(&mut self, bus: &mut EventBus, canvas: &mut C) {
        if let Some(listener) = self.listener.take() {
            bus.off_all(listener);
            log::debug!("snapline: destroyed");
        }
        self.session.reset();
        self.lines.clear(canvas);
    }

    /// Handle an event routed to this plugin.
    ///
    /// Returns the reconcile stats when the canvas was reconciled or cleared.
    /// Events are routed here by the host for the listener returned by
    /// [`SnapLine::listener`], see [`EventBus::emit`].
    pub fn handle_event<G, V>(
        &mut self,
        event: &ElementDragEvent,
        ctx: &mut RuntimeContext<'_, G, V, C>,
    ) -> Option<ReconcileStats>
    where
        G: GraphModel + BoundsProvider + ?Sized,
        V: Viewport + ?Sized,
    {
        if self.is_destroyed() || !self.options.is_enabled(event.element_type) {
            return None;
        }
        match event.phase {
            DragPhase::Start => self.on_drag_start(event, ctx),
            DragPhase::Move => self.on_drag(event, ctx),
            DragPhase::End => self.on_drag_end(event, ctx),
        }
    }

    fn on_drag_start<G, V>(
        &mut self,
        event: &ElementDragEvent,
        ctx: &mut RuntimeContext<'_, G, V, C>,
    ) -> Option<ReconcileStats>
    where
        G: GraphModel + BoundsProvider + ?Sized,
        V: ?Sized,
    {
        // A drag whose end never arrived leaves its lines behind.
        let removed = if self.session.is_dragging() {
            self.lines.clear(&mut *ctx.canvas)
        } else {
            0
        };
        self.session.start(&event.target, ctx.graph);
        (removed > 0).then(|| ReconcileStats {
            removed,
            ..Default::default()
        })
    }

    fn on_drag<G, V>(
        &mut self,
        event: &ElementDragEvent,
        ctx: &mut RuntimeContext<'_, G, V, C>,
    ) -> Option<ReconcileStats>
    where
        G: GraphModel + BoundsProvider + ?Sized,
        V: Viewport + ?Sized,
    {
        let Some(delta) = ctx.viewport.screen_delta_to_canvas(event.delta()) else {
            log::debug!("snapline: unusable zoom {}, tick skipped", ctx.viewport.zoom());
            return None;
        };
        let selected = self
            .session
            .drag(&event.target, delta, ctx.graph, &self.generator)?;

        let stats = self
            .lines
            .reconcile(&mut *ctx.canvas, &selected, &self.options.line_style);
        log::trace!(
            "snapline: {} guide lines (created {}, updated {}, removed {})",
            self.lines.len(),
            stats.created,
            stats.updated,
            stats.removed
        );
        Some(stats)
    }

    fn on_drag_end<G, V>(
        &mut self,
        event: &ElementDragEvent,
        ctx: &mut RuntimeContext<'_, G, V, C>,
    ) -> Option<ReconcileStats>
    where
        G: ?Sized,
        V: ?Sized,
    {
        if !self.session.end(&event.target) || !self.options.clear_on_drag_end {
            return None;
        }
        let removed = self.lines.clear(&mut *ctx.canvas);
        Some(ReconcileStats {
            removed,
            ..Default::default()
        })
    }
}

fn same_element_types(a: &[ElementType], b: &[ElementType]) -> bool {
    a.iter().all(|t| b.contains(t)) && b.iter().all(|t| a.contains(t))
}

fn bind(bus: &mut EventBus, listener: ListenerId, element_types: &[ElementType]) {
    for &element_type in element_types {
        for phase in DragPhase::ALL {
            bus.on(EventName::new(element_type, phase), listener);
        }
    }
}
