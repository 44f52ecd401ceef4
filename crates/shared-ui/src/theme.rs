use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdMonitor, LdMoon, LdSun};
use dioxus_free_icons::Icon;

/// Colour scheme preference. `System` follows `prefers-color-scheme`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemeMode {
    /// Cookie value and `data-theme-mode` attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
            ThemeMode::System => "system",
        }
    }

    /// Parse a stored key, falling back to `System`.
    pub fn from_key(s: &str) -> Self {
        match s {
            "light" => ThemeMode::Light,
            "dark" => ThemeMode::Dark,
            _ => ThemeMode::System,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ThemeMode::Light => "Light",
            ThemeMode::Dark => "Dark",
            ThemeMode::System => "System",
        }
    }

    /// Order used by the toggle: light, dark, system, light, ...
    pub fn next(&self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::System,
            ThemeMode::System => ThemeMode::Light,
        }
    }
}

/// Apply the persisted theme on startup and load it into `mode`. Render
/// once near the root.
#[component]
pub fn ThemeSeed(mode: Signal<ThemeMode>) -> Element {
    let mut mode = mode;
    use_effect(move || {
        let eval = document::eval(
            r#"
            var match = document.cookie.match(/(?:^|;\s*)theme=([^;]*)/);
            var mode = match ? match[1] : 'system';
            var dark = mode === 'dark' ||
                (mode === 'system' && window.matchMedia('(prefers-color-scheme: dark)').matches);
            document.documentElement.setAttribute('data-theme', dark ? 'dark' : 'light');
            document.documentElement.setAttribute('data-theme-mode', mode);
            return mode;
            "#,
        );
        spawn(async move {
            if let Ok(stored) = eval.join::<String>().await {
                mode.set(ThemeMode::from_key(&stored));
            }
        });
    });

    rsx! {}
}

/// Persist `mode` in a cookie and apply it to the document.
pub fn set_theme_mode(mode: ThemeMode) {
    let mode = mode.as_str();
    document::eval(&format!(
        r#"
        (function() {{
            document.cookie = 'theme={mode};path=/;max-age=31536000;SameSite=Lax';
            var dark = '{mode}' === 'dark' ||
                ('{mode}' === 'system' && window.matchMedia('(prefers-color-scheme: dark)').matches);
            document.documentElement.setAttribute('data-theme', dark ? 'dark' : 'light');
            document.documentElement.setAttribute('data-theme-mode', '{mode}');
        }})();
        "#,
    ));
}

/// Button cycling through light, dark and system modes.
#[component]
pub fn ThemeToggle(mode: Signal<ThemeMode>) -> Element {
    let mut mode = mode;
    let current = mode();
    let next = current.next();

    rsx! {
        button {
            r#type: "button",
            class: "button theme-toggle",
            "data-style": "ghost",
            title: "Theme: {current.label()}",
            "aria-label": "Switch to {next.label()} theme",
            onclick: move |_| {
                mode.set(next);
                set_theme_mode(next);
            },
            match current {
                ThemeMode::Light => rsx! { Icon { icon: LdSun, width: 18, height: 18 } },
                ThemeMode::Dark => rsx! { Icon { icon: LdMoon, width: 18, height: 18 } },
                ThemeMode::System => rsx! { Icon { icon: LdMonitor, width: 18, height: 18 } },
            }
        }
    }
}
