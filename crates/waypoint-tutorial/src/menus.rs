#![forbid(unsafe_code)]

//! Headless menu view models.
//!
//! Each menu borrows the [`TutorialController`], reads the state it shows,
//! and turns clicks into state changes. A click on the element the current
//! step highlights also advances the tutorial; clicks on anything else only
//! change menu state.
//!
//! Geometry is per layout: [`panel_metrics`] holds design-pixel sizes for
//! each [`DeviceLayout`], scaled by the frame's [`Px`] and centred in the
//! viewport. Touch categories keep rows at least [`min_row_height`] tall
//! after scaling.

use tracing::info;
use waypoint_core::{ScreenSize, UiRect};
use waypoint_layout::{CategorySwitch, DeviceCategory, DeviceLayout, LayoutSwitch, Px};
use waypoint_runtime::ViewportState;

use crate::controller::{TutorialController, TutorialEvent};
use crate::highlight::PointerDisposition;
use crate::steps::TutorialStep;

// ---------------------------------------------------------------------------
// Inventory catalogue
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemId {
    Sword,
    Potion,
    Shield,
    Bow,
}

impl ItemId {
    pub const fn key(self) -> &'static str {
        match self {
            Self::Sword => "sword",
            Self::Potion => "potion",
            Self::Shield => "shield",
            Self::Bow => "bow",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    pub name: &'static str,
    pub description: &'static str,
}

/// The fixed inventory, in display order.
pub const INVENTORY: [Item; 4] = [
    Item {
        id: ItemId::Sword,
        name: "Iron Sword",
        description: "A sharp blade for combat",
    },
    Item {
        id: ItemId::Potion,
        name: "Health Potion",
        description: "Restores 50 HP",
    },
    Item {
        id: ItemId::Shield,
        name: "Wooden Shield",
        description: "Basic protection",
    },
    Item {
        id: ItemId::Bow,
        name: "Hunting Bow",
        description: "Ranged weapon",
    },
];

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// Everything a view model needs to lay itself out for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    pub viewport: ScreenSize,
    /// Resolved layout used to pick metrics.
    pub layout: DeviceLayout,
    pub px: Px,
}

impl FrameContext {
    pub fn new(viewport: ScreenSize, layout: DeviceLayout, px: Px) -> Self {
        Self {
            viewport,
            layout,
            px,
        }
    }

    /// Frame for the detected layout of a viewport state.
    pub fn from_state(state: ViewportState, px: Px) -> Self {
        Self::new(state.size, state.layout, px)
    }

    pub fn bounds(&self) -> UiRect {
        UiRect::new(0.0, 0.0, self.viewport.width, self.viewport.height)
    }
}

/// Design-pixel sizes of a menu panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelMetrics {
    pub width: f64,
    pub row_height: f64,
    pub gap: f64,
    pub padding: f64,
}

impl PanelMetrics {
    pub const fn new(width: f64, row_height: f64, gap: f64, padding: f64) -> Self {
        Self {
            width,
            row_height,
            gap,
            padding,
        }
    }
}

/// Panel metrics per layout. Phones get wider panels and taller rows in
/// design pixels since their scale is small.
pub fn panel_metrics() -> LayoutSwitch<PanelMetrics> {
    LayoutSwitch::new(PanelMetrics::new(480.0, 64.0, 12.0, 24.0))
        .at(
            DeviceLayout::TabletPortrait,
            PanelMetrics::new(640.0, 80.0, 16.0, 28.0),
        )
        .at(
            DeviceLayout::MobilePortrait,
            PanelMetrics::new(440.0, 96.0, 16.0, 24.0),
        )
        .at(
            DeviceLayout::MobileLandscape,
            PanelMetrics::new(1200.0, 120.0, 20.0, 32.0),
        )
}

/// Smallest row height in screen pixels per device category. Rows on touch
/// devices stay tappable however far the scale shrinks them.
pub fn min_row_height() -> CategorySwitch<f64> {
    CategorySwitch::new(0.0)
        .at(DeviceCategory::Mobile, 44.0)
        .at(DeviceCategory::Tablet, 44.0)
}

/// A panel rectangle and its stacked rows.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelLayout {
    pub panel: UiRect,
    pub rows: Vec<UiRect>,
}

impl PanelLayout {
    /// `rows` equal-height rows centred in the frame.
    pub fn stacked(frame: &FrameContext, rows: usize) -> Self {
        let m = *panel_metrics().pick(frame.layout);
        let px = frame.px;
        let padding = px.px(m.padding);
        let gap = px.px(m.gap);
        let row_height = px
            .px(m.row_height)
            .max(*min_row_height().pick_for(frame.layout));
        let width = px
            .px(m.width)
            .min(frame.viewport.width - 2.0 * padding)
            .max(2.0 * padding + 1.0);

        let inner = rows as f64 * row_height + rows.saturating_sub(1) as f64 * gap;
        let size = ScreenSize::new(width, inner + 2.0 * padding);
        let panel = UiRect::centered(
            frame.viewport.width / 2.0,
            frame.viewport.height / 2.0,
            size,
        );
        let rows = (0..rows)
            .map(|i| {
                UiRect::new(
                    panel.x + padding,
                    panel.y + padding + i as f64 * (row_height + gap),
                    width - 2.0 * padding,
                    row_height,
                )
            })
            .collect();
        Self { panel, rows }
    }

    /// Index of the row containing `(x, y)`.
    pub fn row_at(&self, x: f64, y: f64) -> Option<usize> {
        self.rows.iter().position(|r| r.contains(x, y))
    }
}

/// A labelled control and whether it accepts clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Button {
    pub label: &'static str,
    pub enabled: bool,
}

// ---------------------------------------------------------------------------
// Main menu
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainMenuButton {
    Play,
    Settings,
    Inventory,
}

impl MainMenuButton {
    pub const ALL: [Self; 3] = [Self::Play, Self::Settings, Self::Inventory];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Play => "Play Game",
            Self::Settings => "Settings",
            Self::Inventory => "Inventory",
        }
    }

    /// The step this button completes.
    pub const fn step(self) -> TutorialStep {
        match self {
            Self::Play => TutorialStep::ClickPlayButton,
            Self::Settings => TutorialStep::OpenSettingsMenu,
            Self::Inventory => TutorialStep::OpenInventory,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MainMenu<'a> {
    controller: &'a TutorialController,
}

impl<'a> MainMenu<'a> {
    pub const TITLE: &'static str = "Game Menu";

    pub fn new(controller: &'a TutorialController) -> Self {
        Self { controller }
    }

    /// Settings and Inventory only respond while the tutorial runs.
    pub fn is_enabled(&self, button: MainMenuButton) -> bool {
        match button {
            MainMenuButton::Play => true,
            MainMenuButton::Settings | MainMenuButton::Inventory => self.controller.is_active(),
        }
    }

    pub fn buttons(&self) -> [Button; 3] {
        MainMenuButton::ALL.map(|b| Button {
            label: b.label(),
            enabled: self.is_enabled(b),
        })
    }

    pub fn click(&self, button: MainMenuButton) -> Option<TutorialEvent> {
        if !self.is_enabled(button) {
            return None;
        }
        match button {
            MainMenuButton::Play => info!("play pressed"),
            MainMenuButton::Settings => self.controller.set_settings_open(true),
            MainMenuButton::Inventory => self.controller.set_inventory_open(true),
        }
        self.controller.advance_from(button.step())
    }

    pub fn layout(&self, frame: &FrameContext) -> PanelLayout {
        PanelLayout::stacked(frame, MainMenuButton::ALL.len())
    }

    pub fn button_at(&self, frame: &FrameContext, x: f64, y: f64) -> Option<MainMenuButton> {
        self.layout(frame)
            .row_at(x, y)
            .map(|i| MainMenuButton::ALL[i])
    }

    pub fn report_targets(&self, frame: &FrameContext) {
        let layout = self.layout(frame);
        for (button, rect) in MainMenuButton::ALL.into_iter().zip(layout.rows) {
            self.controller.report_target(button.step(), rect);
        }
    }
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsControl {
    VolumeSlider,
    Close,
}

impl SettingsControl {
    pub const ALL: [Self; 2] = [Self::VolumeSlider, Self::Close];

    pub const fn step(self) -> TutorialStep {
        match self {
            Self::VolumeSlider => TutorialStep::AdjustVolume,
            Self::Close => TutorialStep::CloseSettings,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SettingsMenu<'a> {
    controller: &'a TutorialController,
}

impl<'a> SettingsMenu<'a> {
    pub const TITLE: &'static str = "Settings";

    pub fn new(controller: &'a TutorialController) -> Self {
        Self { controller }
    }

    pub fn is_visible(&self) -> bool {
        self.controller.settings_open()
    }

    pub fn volume_label(&self) -> String {
        format!("Volume: {}%", self.controller.volume())
    }

    /// Slider fill, 0 to 1.
    pub fn volume_fill(&self) -> f64 {
        f64::from(self.controller.volume()) / 100.0
    }

    /// Jump between a quiet and a loud preset.
    pub fn click_slider(&self) -> Option<TutorialEvent> {
        if !self.is_visible() {
            return None;
        }
        let next = if self.controller.volume() < 50 { 100 } else { 25 };
        self.controller.set_volume(next);
        info!(volume = next, "volume changed");
        self.controller.advance_from(TutorialStep::AdjustVolume)
    }

    pub fn close(&self) -> Option<TutorialEvent> {
        if !self.is_visible() {
            return None;
        }
        self.controller.set_settings_open(false);
        self.controller.advance_from(TutorialStep::CloseSettings)
    }

    pub fn click(&self, control: SettingsControl) -> Option<TutorialEvent> {
        match control {
            SettingsControl::VolumeSlider => self.click_slider(),
            SettingsControl::Close => self.close(),
        }
    }

    pub fn layout(&self, frame: &FrameContext) -> PanelLayout {
        PanelLayout::stacked(frame, SettingsControl::ALL.len())
    }

    pub fn control_at(&self, frame: &FrameContext, x: f64, y: f64) -> Option<SettingsControl> {
        if !self.is_visible() {
            return None;
        }
        self.layout(frame)
            .row_at(x, y)
            .map(|i| SettingsControl::ALL[i])
    }

    pub fn report_targets(&self, frame: &FrameContext) {
        let layout = self.layout(frame);
        for (control, rect) in SettingsControl::ALL.into_iter().zip(layout.rows) {
            self.controller.report_target(control.step(), rect);
        }
    }
}

// ---------------------------------------------------------------------------
// Inventory
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryControl {
    Item(ItemId),
    UseItem,
    Close,
}

#[derive(Debug, Clone, Copy)]
pub struct InventoryMenu<'a> {
    controller: &'a TutorialController,
}

impl<'a> InventoryMenu<'a> {
    pub const TITLE: &'static str = "Inventory";
    const ROWS: usize = INVENTORY.len() + 2;

    pub fn new(controller: &'a TutorialController) -> Self {
        Self { controller }
    }

    pub fn is_visible(&self) -> bool {
        self.controller.inventory_open()
    }

    pub fn items(&self) -> &'static [Item] {
        &INVENTORY
    }

    pub fn is_selected(&self, id: ItemId) -> bool {
        self.controller.selected_item() == Some(id)
    }

    pub fn use_button(&self) -> Button {
        Button {
            label: "Use Item",
            enabled: self.controller.selected_item().is_some(),
        }
    }

    /// Select an item. Only the first item completes the selection step.
    pub fn select(&self, id: ItemId) -> Option<TutorialEvent> {
        if !self.is_visible() {
            return None;
        }
        self.controller.select_item(Some(id));
        if id == INVENTORY[0].id {
            self.controller.advance_from(TutorialStep::SelectItem)
        } else {
            None
        }
    }

    pub fn use_item(&self) -> Option<TutorialEvent> {
        let item = self.controller.selected_item()?;
        if !self.is_visible() {
            return None;
        }
        info!(item = item.key(), "item used");
        self.controller.advance_from(TutorialStep::UseItem)
    }

    /// Hide the panel and drop the selection.
    pub fn close(&self) -> Option<TutorialEvent> {
        if !self.is_visible() {
            return None;
        }
        self.controller.set_inventory_open(false);
        self.controller.select_item(None);
        self.controller.advance_from(TutorialStep::CloseInventory)
    }

    pub fn click(&self, control: InventoryControl) -> Option<TutorialEvent> {
        match control {
            InventoryControl::Item(id) => self.select(id),
            InventoryControl::UseItem => self.use_item(),
            InventoryControl::Close => self.close(),
        }
    }

    pub fn layout(&self, frame: &FrameContext) -> PanelLayout {
        PanelLayout::stacked(frame, Self::ROWS)
    }

    fn control_for_row(row: usize) -> Option<InventoryControl> {
        match row {
            r if r < INVENTORY.len() => Some(InventoryControl::Item(INVENTORY[r].id)),
            r if r == INVENTORY.len() => Some(InventoryControl::UseItem),
            r if r == INVENTORY.len() + 1 => Some(InventoryControl::Close),
            _ => None,
        }
    }

    pub fn control_at(&self, frame: &FrameContext, x: f64, y: f64) -> Option<InventoryControl> {
        if !self.is_visible() {
            return None;
        }
        self.layout(frame)
            .row_at(x, y)
            .and_then(Self::control_for_row)
    }

    pub fn report_targets(&self, frame: &FrameContext) {
        let layout = self.layout(frame);
        let targets = [
            (TutorialStep::SelectItem, 0),
            (TutorialStep::UseItem, INVENTORY.len()),
            (TutorialStep::CloseInventory, INVENTORY.len() + 1),
        ];
        for (step, row) in targets {
            if let Some(rect) = layout.rows.get(row) {
                self.controller.report_target(step, *rect);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tutorial controls
// ---------------------------------------------------------------------------

/// Status line and a restart/stop toggle.
#[derive(Debug, Clone, Copy)]
pub struct TutorialControls<'a> {
    controller: &'a TutorialController,
}

impl<'a> TutorialControls<'a> {
    pub const TITLE: &'static str = "Tutorial Controls";

    pub fn new(controller: &'a TutorialController) -> Self {
        Self { controller }
    }

    pub fn status(&self) -> &'static str {
        if self.controller.is_active() {
            "Tutorial Running..."
        } else {
            "Auto-started on Play"
        }
    }

    pub fn toggle_button(&self) -> Button {
        let label = if self.controller.is_active() {
            "Stop Tutorial"
        } else {
            "Restart Tutorial"
        };
        Button {
            label,
            enabled: true,
        }
    }

    pub fn toggle(&self) -> Option<TutorialEvent> {
        if self.controller.is_active() {
            self.controller.stop()
        } else {
            Some(self.controller.start())
        }
    }
}

// ---------------------------------------------------------------------------
// Pointer routing
// ---------------------------------------------------------------------------

/// Which control a press landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuControl {
    Main(MainMenuButton),
    Settings(SettingsControl),
    Inventory(InventoryControl),
}

/// Result of routing a pointer press through the highlight and the menus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    /// Swallowed by the highlight.
    Blocked,
    /// Reached the UI but hit no control.
    Missed,
    /// Hit a control, possibly advancing the tutorial.
    Hit {
        control: MenuControl,
        event: Option<TutorialEvent>,
    },
}

/// All menus over one controller, for reporting targets and routing presses.
#[derive(Debug, Clone, Copy)]
pub struct Menus<'a> {
    pub main: MainMenu<'a>,
    pub settings: SettingsMenu<'a>,
    pub inventory: InventoryMenu<'a>,
    pub controls: TutorialControls<'a>,
    controller: &'a TutorialController,
}

impl<'a> Menus<'a> {
    pub fn new(controller: &'a TutorialController) -> Self {
        Self {
            main: MainMenu::new(controller),
            settings: SettingsMenu::new(controller),
            inventory: InventoryMenu::new(controller),
            controls: TutorialControls::new(controller),
            controller,
        }
    }

    /// Report target rectangles of the visible panels.
    pub fn report_targets(&self, frame: &FrameContext) {
        self.main.report_targets(frame);
        if self.settings.is_visible() {
            self.settings.report_targets(frame);
        }
        if self.inventory.is_visible() {
            self.inventory.report_targets(frame);
        }
    }

    /// The topmost control under `(x, y)`. Open panels sit above the main
    /// menu.
    pub fn control_at(&self, frame: &FrameContext, x: f64, y: f64) -> Option<MenuControl> {
        if self.settings.is_visible() {
            return self
                .settings
                .control_at(frame, x, y)
                .map(MenuControl::Settings);
        }
        if self.inventory.is_visible() {
            return self
                .inventory
                .control_at(frame, x, y)
                .map(MenuControl::Inventory);
        }
        self.main.button_at(frame, x, y).map(MenuControl::Main)
    }

    pub fn click(&self, control: MenuControl) -> Option<TutorialEvent> {
        match control {
            MenuControl::Main(b) => self.main.click(b),
            MenuControl::Settings(c) => self.settings.click(c),
            MenuControl::Inventory(c) => self.inventory.click(c),
        }
    }

    /// Route a press: the highlight may swallow it, otherwise the topmost
    /// control under the pointer is clicked.
    pub fn press(&self, frame: &FrameContext, x: f64, y: f64) -> PressOutcome {
        self.report_targets(frame);
        if self.controller.hit_test(x, y) == PointerDisposition::Blocked {
            return PressOutcome::Blocked;
        }
        match self.control_at(frame, x, y) {
            Some(control) => PressOutcome::Hit {
                control,
                event: self.click(control),
            },
            None => PressOutcome::Missed,
        }
    }
}
