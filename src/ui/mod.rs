pub mod components;
pub mod theme;

mod connecting;
mod details;
mod header;
mod help;
mod hidden;
mod network_list;
mod password;
mod profiles;
mod status_bar;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::Frame;

use crate::app::{App, Screen};
use components::confirm_dialog;
use theme::Theme;

/// Top-level draw: header, the list underneath, the modal for the current screen, status bar
pub fn draw(f: &mut Frame, app: &App, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(f.area());

    header::render(f, app, theme, chunks[0]);

    let on_profiles = app.screen == Screen::KnownProfilesList
        || (app.screen == Screen::ConfirmForget && app.previous_screen == Screen::KnownProfilesList);
    if on_profiles {
        profiles::render(f, app, theme, chunks[1]);
    } else {
        network_list::render(f, app, theme, chunks[1]);
    }

    let body = chunks[1];
    match app.screen {
        Screen::NetworksList | Screen::KnownProfilesList => {}
        Screen::PasswordInput => password::render(f, app, theme, body),
        Screen::HiddenSsidInput => hidden::render(f, app, theme, body),
        Screen::Connecting => connecting::render_connecting(f, app, theme, body),
        Screen::ConnectionResult => connecting::render_result(f, app, theme, body),
        Screen::ActiveConnectionInfo => details::render(f, app, theme, body),
        Screen::ConfirmDisconnect => {
            let name = app
                .disconnect_target
                .as_ref()
                .map_or("the current network", |p| p.name.as_str());
            confirm_dialog::render(
                f,
                body,
                "Disconnect",
                &format!("Disconnect from '{name}'?"),
                theme,
            );
        }
        Screen::ConfirmForget => {
            let name = app
                .forget_target
                .as_ref()
                .map_or("this network", |p| p.name.as_str());
            confirm_dialog::render(
                f,
                body,
                "Forget Network",
                &format!("Forget saved network '{name}'?"),
                theme,
            );
        }
        Screen::ConfirmOpenNetworkConnect => {
            let ssid = app
                .selected
                .as_ref()
                .and_then(|e| e.ssid())
                .unwrap_or_default();
            confirm_dialog::render(
                f,
                body,
                "Open Network",
                &format!("'{ssid}' is unencrypted. Connect anyway?"),
                theme,
            );
        }
    }

    if app.show_help {
        help::render(f, app, theme, f.area());
    }

    status_bar::render(f, app, theme, chunks[2]);
}

/// A fixed-size rect centered in `area`, clamped to fit
pub fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
