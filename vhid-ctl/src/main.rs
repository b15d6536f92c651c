use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use vhid::{
    Button, Dial, Gamepad, GamepadIdentity, GamepadTemplates, Keyboard, Mouse, MultiTouch,
    Settings, VirtualDevice, keys,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// uinput device node
    #[arg(short, long, default_value = "/dev/uinput")]
    path: PathBuf,

    /// Name the virtual device reports
    #[arg(short, long, default_value = "vhid-ctl")]
    name: String,

    /// Settings file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the settle delay after creation, in milliseconds
    #[arg(long)]
    settle_ms: Option<u64>,

    /// How long to keep the device alive after the action, in milliseconds
    #[arg(long, default_value = "500")]
    hold_ms: u64,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand, Debug)]
enum Action {
    /// Press and release a key, by name (`a`, `KEY_ENTER`) or code
    Key { key: String },

    /// Click a mouse button
    Click {
        #[arg(value_enum, default_value = "left")]
        button: MouseButton,
    },

    /// Move the mouse pointer by a relative amount
    Move {
        #[arg(allow_hyphen_values = true)]
        dx: i32,
        #[arg(allow_hyphen_values = true)]
        dy: i32,
    },

    /// Scroll the mouse wheel
    Scroll {
        #[arg(allow_hyphen_values = true)]
        delta: i32,

        #[arg(long)]
        horizontal: bool,
    },

    /// Turn a rotary dial
    Dial {
        #[arg(allow_hyphen_values = true)]
        delta: i32,
    },

    /// Press a gamepad button
    Pad {
        /// Button name (`south`, `start`, `dpad-up`, ...)
        button: String,

        /// Identity preset (xbox360, xbox-one, ps4, ps5, switch-pro, generic)
        #[arg(short, long, default_value = "generic")]
        template: String,

        /// Identity from a JSON file, overriding --template
        #[arg(long)]
        identity: Option<PathBuf>,
    },

    /// Tap a multi-touch panel at a position
    Touch {
        x: i32,
        y: i32,

        #[arg(long, default_value = "1920")]
        width: i32,

        #[arg(long, default_value = "1080")]
        height: i32,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum MouseButton {
    Left,
    Right,
    Middle,
}

fn load_settings(args: &Args) -> anyhow::Result<Settings> {
    let mut settings = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("Invalid settings in {}", path.display()))?
        }
        None => Settings::from_env(),
    };

    if let Some(ms) = args.settle_ms {
        settings = settings.with_settle_delay(Duration::from_millis(ms));
    }
    Ok(settings)
}

fn parse_key(key: &str) -> anyhow::Result<u16> {
    if let Some(code) = keys::by_name(key) {
        return Ok(code);
    }
    key.parse()
        .with_context(|| format!("Unknown key '{}'", key))
}

fn load_identity(template: &str, identity: Option<&PathBuf>) -> anyhow::Result<GamepadIdentity> {
    if let Some(path) = identity {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        return serde_json::from_str(&text)
            .with_context(|| format!("Invalid identity in {}", path.display()));
    }

    match GamepadTemplates::by_name(template) {
        Some(identity) => Ok(identity),
        None => bail!(
            "Unknown template '{}' (expected one of: {})",
            template,
            GamepadTemplates::NAMES.join(", ")
        ),
    }
}

/// Keep the device around long enough for listeners to see the events, then close it.
/// Axis ranges `0..=size - 1` for a panel of the given size.
fn panel_ranges(width: i32, height: i32) -> anyhow::Result<((i32, i32), (i32, i32))> {
    if width <= 0 || height <= 0 {
        bail!("Panel size must be positive, got {}x{}", width, height);
    }
    Ok(((0, width - 1), (0, height - 1)))
}

fn finish(device: &mut impl VirtualDevice, hold: Duration) -> anyhow::Result<()> {
    if let Ok(syspath) = device.syspath() {
        tracing::info!("Device at {}", syspath.display());
    }
    thread::sleep(hold);
    device.close().context("Failed to close device")
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let settings = load_settings(&args)?;
    let hold = Duration::from_millis(args.hold_ms);
    let path = &args.path;
    let name = &args.name;

    tracing::debug!("Settings: {:?}", settings);

    match &args.action {
        Action::Key { key } => {
            let code = parse_key(key)?;
            let mut kb = Keyboard::create_with(&settings, path, name)?;
            kb.key_press(code)?;
            finish(&mut kb, hold)?;
        }
        Action::Click { button } => {
            let mut mouse = Mouse::create_with(&settings, path, name)?;
            match button {
                MouseButton::Left => mouse.left_click()?,
                MouseButton::Right => mouse.right_click()?,
                MouseButton::Middle => mouse.middle_click()?,
            }
            finish(&mut mouse, hold)?;
        }
        Action::Move { dx, dy } => {
            let mut mouse = Mouse::create_with(&settings, path, name)?;
            mouse.move_by(*dx, *dy)?;
            finish(&mut mouse, hold)?;
        }
        Action::Scroll { delta, horizontal } => {
            let mut mouse = Mouse::create_with(&settings, path, name)?;
            mouse.wheel(*horizontal, *delta)?;
            finish(&mut mouse, hold)?;
        }
        Action::Dial { delta } => {
            let mut dial = Dial::create_with(&settings, path, name)?;
            dial.turn(*delta)?;
            finish(&mut dial, hold)?;
        }
        Action::Pad {
            button,
            template,
            identity,
        } => {
            let button = Button::from_name(button)
                .with_context(|| format!("Unknown gamepad button '{}'", button))?;
            let identity = load_identity(template, identity.as_ref())?;
            tracing::info!(
                "Using identity '{}' ({:04x}:{:04x})",
                identity.name,
                identity.vendor_id,
                identity.product_id
            );

            let mut pad = Gamepad::from_identity(&settings, path, &identity)?;
            pad.button_press(button)?;
            finish(&mut pad, hold)?;
        }
        Action::Touch {
            x,
            y,
            width,
            height,
        } => {
            let (x_range, y_range) = panel_ranges(*width, *height)?;
            let mut panel = MultiTouch::create_with(&settings, path, name, x_range, y_range, 1)?;
            {
                let mut contact = panel
                    .contact_mut(0)
                    .context("Panel has no contact slot")?;
                contact.touch_down_at(*x, *y)?;
                contact.touch_up()?;
            }
            finish(&mut panel, hold)?;
        }
    }

    Ok(())
}
