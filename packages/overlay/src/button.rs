//! Toggle button: a discrete visual state machine driving per-state
//! texture selection, plus one caption draw.

use crate::{
    event::MouseButton,
    frame::Control,
    host::NativePaint,
};
use sprite2d::{
    device::{
        Device,
        SpriteImage,
    },
    sprite::SpriteBatch,
    texture::Texture,
};
use std::path::Path;
use anyhow::Result;
use tracing::*;
use vek::*;


/// Discrete visual state of a toggle button. Exactly one is active at a
/// time; the `Off*`/`On*` halves mirror the persistent selected flag.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ButtonState {
    OffNone,
    OffFocus,
    OffHover,
    OffDown,
    OnNone,
    OnFocus,
    OnHover,
    OnDown,
}

impl ButtonState {
    /// The resting state for a selected flag.
    pub fn none_for(selected: bool) -> Self {
        if selected { ButtonState::OnNone } else { ButtonState::OffNone }
    }

    /// The hover state for a selected flag.
    pub fn hover_for(selected: bool) -> Self {
        if selected { ButtonState::OnHover } else { ButtonState::OffHover }
    }

    /// The pressed state for a selected flag.
    pub fn down_for(selected: bool) -> Self {
        if selected { ButtonState::OnDown } else { ButtonState::OffDown }
    }

    fn is_hover(self) -> bool {
        matches!(self, ButtonState::OffHover | ButtonState::OnHover)
    }
}


/// One owned texture per button state. The mapping is total, so selecting
/// the active slot can never hit an unmapped state.
struct StateTextures<I> {
    off_none: Texture<I>,
    off_focus: Texture<I>,
    off_hover: Texture<I>,
    off_down: Texture<I>,
    on_none: Texture<I>,
    on_focus: Texture<I>,
    on_hover: Texture<I>,
    on_down: Texture<I>,
}

impl<I: SpriteImage> StateTextures<I> {
    fn new() -> Self {
        StateTextures {
            off_none: Texture::new(),
            off_focus: Texture::new(),
            off_hover: Texture::new(),
            off_down: Texture::new(),
            on_none: Texture::new(),
            on_focus: Texture::new(),
            on_hover: Texture::new(),
            on_down: Texture::new(),
        }
    }

    fn get(&self, state: ButtonState) -> &Texture<I> {
        match state {
            ButtonState::OffNone => &self.off_none,
            ButtonState::OffFocus => &self.off_focus,
            ButtonState::OffHover => &self.off_hover,
            ButtonState::OffDown => &self.off_down,
            ButtonState::OnNone => &self.on_none,
            ButtonState::OnFocus => &self.on_focus,
            ButtonState::OnHover => &self.on_hover,
            ButtonState::OnDown => &self.on_down,
        }
    }

    fn get_mut(&mut self, state: ButtonState) -> &mut Texture<I> {
        match state {
            ButtonState::OffNone => &mut self.off_none,
            ButtonState::OffFocus => &mut self.off_focus,
            ButtonState::OffHover => &mut self.off_hover,
            ButtonState::OffDown => &mut self.off_down,
            ButtonState::OnNone => &mut self.on_none,
            ButtonState::OnFocus => &mut self.on_focus,
            ButtonState::OnHover => &mut self.on_hover,
            ButtonState::OnDown => &mut self.on_down,
        }
    }

    fn slots_mut(&mut self) -> [&mut Texture<I>; 8] {
        [
            &mut self.off_none,
            &mut self.off_focus,
            &mut self.off_hover,
            &mut self.off_down,
            &mut self.on_none,
            &mut self.on_focus,
            &mut self.on_hover,
            &mut self.on_down,
        ]
    }
}


/// Toggle button control.
///
/// Textures are bound per state with `set_texture`; there is deliberately no
/// whole-control load operation. Mouse events drive the state machine:
/// entering hovers, a left press arms, the matching release flips the
/// persistent selected flag, leaving rests.
pub struct Button<D: Device> {
    position: Vec2<f32>,
    size: Extent2<f32>,
    pub caption: String,
    pub color: Rgba<f32>,
    state: ButtonState,
    selected: bool,
    /// A left press seen while hovering, not yet released.
    pressed: bool,
    slots: StateTextures<D::Image>,
    sprite: SpriteBatch,
}

impl<D: Device> Button<D> {
    /// New button at the origin, unselected, resting, with no slot bound.
    pub fn new() -> Self {
        Button {
            position: Vec2::zero(),
            size: Extent2::new(0.0, 0.0),
            caption: String::from("Caption"),
            color: Rgba::white(),
            state: ButtonState::OffNone,
            selected: false,
            pressed: false,
            slots: StateTextures::new(),
            sprite: SpriteBatch::new(),
        }
    }

    pub fn position(&self) -> Vec2<f32> {
        self.position
    }

    pub fn size(&self) -> Extent2<f32> {
        self.size
    }

    pub fn state(&self) -> ButtonState {
        self.state
    }

    /// The persistent toggle flag.
    pub fn selected(&self) -> bool {
        self.selected
    }

    /// The texture slot bound to `state`.
    pub fn texture(&self, state: ButtonState) -> &Texture<D::Image> {
        self.slots.get(state)
    }

    /// Move the button. Every slot's translation is recomputed so whichever
    /// slot renders stays glued to the control's host coordinates.
    pub fn set_position<V: Into<Vec2<f32>>>(&mut self, position: V) {
        self.position = position.into();
        for slot in self.slots.slots_mut() {
            slot.translation = self.position;
        }
    }

    /// Load the texture slot for `state` from an image file, giving it
    /// identity scaling and a translation glued to the control's position.
    /// The control takes the decoded image's pixel dimensions.
    ///
    /// On failure the slot's previously bound image and the control are left
    /// untouched.
    pub fn set_texture(
        &mut self,
        device: &mut D,
        state: ButtonState,
        path: &Path,
    ) -> Result<()> {
        let position = self.position;
        let slot = self.slots.get_mut(state);
        let image_size = slot.load(device, path)?;
        slot.scaling = Vec2::new(1.0, 1.0);
        slot.translation = position;
        self.size = Extent2::new(image_size.w as f32, image_size.h as f32);
        debug!("bound {:?} slot from {:?}", state, path);
        Ok(())
    }

    fn transition(&mut self, to: ButtonState) {
        if self.state != to {
            debug!("button state {:?} -> {:?}", self.state, to);
            self.state = to;
        }
    }

    /// Mouse entered the control's bounds.
    pub fn on_mouse_enter(&mut self) {
        self.transition(ButtonState::hover_for(self.selected));
    }

    /// Mouse left the control's bounds. Any armed press is abandoned.
    pub fn on_mouse_leave(&mut self) {
        self.pressed = false;
        self.transition(ButtonState::none_for(self.selected));
    }

    /// A mouse button was pressed with the cursor over the control.
    pub fn on_mouse_down(&mut self, button: MouseButton, _pos: Vec2<f32>) {
        if button != MouseButton::Left {
            return;
        }
        if self.state.is_hover() {
            self.pressed = true;
            self.transition(ButtonState::down_for(self.selected));
        }
    }

    /// A mouse button was released. The release matching an armed left
    /// press flips the persistent selected flag.
    pub fn on_mouse_up(&mut self, button: MouseButton, _pos: Vec2<f32>) {
        if button != MouseButton::Left || !self.pressed {
            return;
        }
        self.pressed = false;
        self.selected = !self.selected;
        debug!("button toggled, selected = {}", self.selected);
        self.transition(ButtonState::none_for(self.selected));
    }

    /// Draw the texture bound to the current state, then the caption.
    /// Returns false, without touching the device, if the active state's
    /// slot has no image bound.
    pub fn render(&mut self, device: &mut D) -> bool {
        let slot = self.slots.get(self.state);
        if slot.image().is_none() {
            return false;
        }
        self.sprite.draw_texture(device, slot);
        device.draw_text(
            &self.caption,
            self.position + Vec2::new(10.0, 10.0),
            self.color,
        );
        true
    }

    /// Native paint suppression: the sprite draw is the only visual output.
    pub fn native_paint(&self) -> NativePaint {
        NativePaint::Suppressed
    }

    /// Release every texture slot. Idempotent.
    pub fn dispose(&mut self) {
        for slot in self.slots.slots_mut() {
            slot.dispose();
        }
    }
}

impl<D: Device> Control<D> for Button<D> {
    fn render(&mut self, device: &mut D) -> bool {
        Button::render(self, device)
    }

    fn dispose(&mut self) {
        Button::dispose(self)
    }
}


#[cfg(test)]
fn eight_slot_button() -> (sprite2d::record::RecordDevice, Button<sprite2d::record::RecordDevice>) {
    use sprite2d::record::RecordDevice;

    let states = [
        (ButtonState::OffNone, "off_none.png"),
        (ButtonState::OffFocus, "off_focus.png"),
        (ButtonState::OffHover, "off_hover.png"),
        (ButtonState::OffDown, "off_down.png"),
        (ButtonState::OnNone, "on_none.png"),
        (ButtonState::OnFocus, "on_focus.png"),
        (ButtonState::OnHover, "on_hover.png"),
        (ButtonState::OnDown, "on_down.png"),
    ];

    let mut device = RecordDevice::new();
    for &(_, path) in &states {
        device.provide_image(path, Extent2::new(96, 32));
    }

    let mut button = Button::new();
    for &(state, path) in &states {
        button.set_texture(&mut device, state, path.as_ref()).unwrap();
    }
    device.clear_commands();
    (device, button)
}

#[test]
fn test_toggle_round_trip() {
    let (_, mut button) = eight_slot_button();
    assert_eq!(button.state(), ButtonState::OffNone);

    button.on_mouse_enter();
    assert_eq!(button.state(), ButtonState::OffHover);
    button.on_mouse_down(MouseButton::Left, Vec2::zero());
    assert_eq!(button.state(), ButtonState::OffDown);
    button.on_mouse_up(MouseButton::Left, Vec2::zero());
    assert_eq!(button.state(), ButtonState::OnNone);
    assert!(button.selected());

    button.on_mouse_enter();
    assert_eq!(button.state(), ButtonState::OnHover);
    button.on_mouse_down(MouseButton::Left, Vec2::zero());
    assert_eq!(button.state(), ButtonState::OnDown);
    button.on_mouse_up(MouseButton::Left, Vec2::zero());
    assert_eq!(button.state(), ButtonState::OffNone);
    assert!(!button.selected());
}

#[test]
fn test_leave_abandons_press_and_rests() {
    let (_, mut button) = eight_slot_button();

    button.on_mouse_enter();
    button.on_mouse_down(MouseButton::Left, Vec2::zero());
    button.on_mouse_leave();
    assert_eq!(button.state(), ButtonState::OffNone);

    // the abandoned press must not toggle on a later release
    button.on_mouse_up(MouseButton::Left, Vec2::zero());
    assert_eq!(button.state(), ButtonState::OffNone);
    assert!(!button.selected());
}

#[test]
fn test_non_left_buttons_are_ignored() {
    let (_, mut button) = eight_slot_button();

    button.on_mouse_enter();
    button.on_mouse_down(MouseButton::Right, Vec2::zero());
    assert_eq!(button.state(), ButtonState::OffHover);
    button.on_mouse_up(MouseButton::Right, Vec2::zero());
    assert_eq!(button.state(), ButtonState::OffHover);
    assert!(!button.selected());
}

#[test]
fn test_render_selects_active_state_slot() {
    let (mut device, mut button) = eight_slot_button();

    assert!(button.render(&mut device));
    button.on_mouse_enter();
    button.render(&mut device);

    let drawn = device.drawn_images();
    assert_eq!(drawn.len(), 2);
    assert_eq!(drawn[0].path, std::path::Path::new("off_none.png"));
    assert_eq!(drawn[1].path, std::path::Path::new("off_hover.png"));
}

#[test]
fn test_render_draws_caption_after_texture() {
    use sprite2d::record::Command;

    let (mut device, mut button) = eight_slot_button();
    button.caption = String::from("Play");
    button.set_position([50.0, 60.0]);

    button.render(&mut device);
    assert_eq!(device.drawn_texts(), vec!["Play"]);
    assert!(matches!(
        device.commands.last(),
        Some(Command::DrawText { pos, .. }) if *pos == Vec2::new(60.0, 70.0)
    ));
}

#[test]
fn test_render_false_when_active_slot_unbound() {
    use sprite2d::record::RecordDevice;

    let mut device = RecordDevice::new();
    device.provide_image("on_none.png", Extent2::new(96, 32));

    let mut button: Button<RecordDevice> = Button::new();
    button.set_texture(&mut device, ButtonState::OnNone, "on_none.png".as_ref())
        .unwrap();
    device.clear_commands();

    // active state is OffNone, which has no image
    assert!(!button.render(&mut device));
    assert!(device.commands.is_empty());
}

#[test]
fn test_set_texture_uses_position_not_image_size() {
    // the slot translation follows the control position, also when the
    // control sits at the origin and the image does not
    let (_, mut button) = eight_slot_button();
    assert_eq!(
        button.texture(ButtonState::OffNone).translation,
        Vec2::zero(),
    );

    button.set_position([25.0, 75.0]);
    for state in [ButtonState::OffNone, ButtonState::OnDown] {
        assert_eq!(
            button.texture(state).translation,
            Vec2::new(25.0, 75.0),
        );
    }
}

#[test]
fn test_set_texture_failure_leaves_slot_and_size() {
    let (mut device, mut button) = eight_slot_button();

    let result = button.set_texture(
        &mut device,
        ButtonState::OffNone,
        "missing.png".as_ref(),
    );
    assert!(result.is_err());
    assert_eq!(button.size(), Extent2::new(96.0, 32.0));
    assert_eq!(
        button.texture(ButtonState::OffNone).size(),
        Some(Extent2::new(96, 32)),
    );
}

#[test]
fn test_dispose_is_idempotent_and_unbinds_all_slots() {
    let (mut device, mut button) = eight_slot_button();

    button.dispose();
    button.dispose();
    assert!(button.texture(ButtonState::OffNone).image().is_none());
    assert!(button.texture(ButtonState::OnDown).image().is_none());
    assert!(!button.render(&mut device));
}
