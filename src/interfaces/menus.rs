use dialoguer::Select;
use dialoguer::theme::ColorfulTheme;
use console::Style;

fn launcher_theme() -> ColorfulTheme {
    let mut theme = ColorfulTheme::default();

    theme.active_item_style = Style::new().black().bold().on_white();
    theme.inactive_item_style = Style::new().white();
    theme.prompt_style = Style::new().white().bold();
    theme.prompt_prefix = Style::new().apply_to("".to_string());
    theme.prompt_suffix = Style::new().apply_to("".to_string());
    theme.active_item_prefix = Style::new().white().bold().apply_to(">".to_string());
    theme.inactive_item_prefix = Style::new().apply_to(" ".to_string());

    theme
}

// Arrow-key menu, returns the index of the picked option
pub fn menu_generator(prompt: &str, options: &[&str]) -> Result<usize, dialoguer::Error> {
    Select::with_theme(&launcher_theme())
        .with_prompt(prompt)
        .items(options)
        .default(0)
        .interact()
}
