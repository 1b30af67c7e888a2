use clap::builder::styling::{AnsiColor, Color, Style};
use clap::builder::Styles;
use crossterm::style::{Attribute, Color as CtColor, Stylize};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

// ═══════════════════════════════════════════════════════════════════════════════
// Clap Styles
// ═══════════════════════════════════════════════════════════════════════════════

pub fn get_styles() -> Styles {
    clap::builder::Styles::styled()
        .usage(
            Style::new()
                .bold()
                .underline()
                .fg_color(Some(Color::Ansi(AnsiColor::Yellow))),
        )
        .header(
            Style::new()
                .bold()
                .underline()
                .fg_color(Some(Color::Ansi(AnsiColor::Yellow))),
        )
        .literal(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Green))),
        )
        .invalid(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Red))),
        )
        .error(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Red))),
        )
        .valid(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Green))),
        )
        .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::BrightBlack))))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Color Palette
// ═══════════════════════════════════════════════════════════════════════════════

pub mod colors {
    use crossterm::style::Color;

    pub const AMBER: Color = Color::Rgb {
        r: 255,
        g: 191,
        b: 0,
    };
    pub const CREAM: Color = Color::Rgb {
        r: 255,
        g: 240,
        b: 200,
    };
    pub const TEAL: Color = Color::Rgb {
        r: 0,
        g: 180,
        b: 170,
    };
    pub const GREEN: Color = Color::Rgb {
        r: 120,
        g: 220,
        b: 120,
    };
    pub const ORANGE: Color = Color::Rgb {
        r: 255,
        g: 140,
        b: 60,
    };
    pub const RED: Color = Color::Rgb {
        r: 255,
        g: 85,
        b: 85,
    };
    pub const DIM: Color = Color::Rgb {
        r: 128,
        g: 128,
        b: 128,
    };
}

// ═══════════════════════════════════════════════════════════════════════════════
// Box Drawing Characters
// ═══════════════════════════════════════════════════════════════════════════════

pub mod box_chars {
    pub const HORIZONTAL: &str = "─";
    pub const VERTICAL: &str = "│";

    pub const ROUND_TOP_LEFT: &str = "╭";
    pub const ROUND_TOP_RIGHT: &str = "╮";
    pub const ROUND_BOTTOM_LEFT: &str = "╰";
    pub const ROUND_BOTTOM_RIGHT: &str = "╯";

    pub const T_LEFT: &str = "├";
    pub const T_RIGHT: &str = "┤";
    pub const T_TOP: &str = "┬";
    pub const T_BOTTOM: &str = "┴";
    pub const CROSS: &str = "┼";

    pub const RECORD: &str = "◉";
    pub const BULLET: &str = "●";
    pub const BULLET_EMPTY: &str = "○";
    pub const DIAMOND: &str = "◆";
    pub const CHECK: &str = "✓";
    pub const CROSS_MARK: &str = "✗";
    pub const ELLIPSIS: &str = "…";
}

// ═══════════════════════════════════════════════════════════════════════════════
// Status Indicators
// ═══════════════════════════════════════════════════════════════════════════════

pub fn print_success(message: &str) {
    println!(
        " {} {}",
        box_chars::CHECK.to_string().with(colors::GREEN).bold(),
        message.with(colors::GREEN)
    );
}

pub fn print_error(message: &str) {
    println!(
        " {} {}",
        box_chars::CROSS_MARK.to_string().with(colors::RED).bold(),
        message.with(colors::RED)
    );
}

pub fn print_warning(message: &str) {
    println!(
        " {} {}",
        "⚠".with(colors::ORANGE).bold(),
        message.with(colors::ORANGE)
    );
}

pub fn print_info(message: &str) {
    println!(
        " {} {}",
        "ℹ".with(colors::TEAL).bold(),
        message.with(colors::TEAL)
    );
}

// ═══════════════════════════════════════════════════════════════════════════════
// Section Headers
// ═══════════════════════════════════════════════════════════════════════════════

const SECTION_WIDTH: usize = 60;

pub fn print_section_header(title: &str) {
    let title_len = title.width();
    let padding = SECTION_WIDTH.saturating_sub(title_len + 4) / 2;

    println!();
    print!("{}", box_chars::ROUND_TOP_LEFT.with(colors::AMBER));
    print!("{}", box_chars::HORIZONTAL.repeat(padding).with(colors::AMBER));
    print!(
        " {} ",
        title.with(colors::AMBER).bold().attribute(Attribute::Italic)
    );
    print!(
        "{}",
        box_chars::HORIZONTAL
            .repeat(SECTION_WIDTH.saturating_sub(title_len + 4 + padding))
            .with(colors::AMBER)
    );
    println!("{}", box_chars::ROUND_TOP_RIGHT.with(colors::AMBER));
}

pub fn print_section_footer() {
    print!("{}", box_chars::ROUND_BOTTOM_LEFT.with(colors::AMBER));
    print!(
        "{}",
        box_chars::HORIZONTAL
            .repeat(SECTION_WIDTH)
            .with(colors::AMBER)
    );
    println!("{}", box_chars::ROUND_BOTTOM_RIGHT.with(colors::AMBER));
    println!();
}

// ═══════════════════════════════════════════════════════════════════════════════
// Key-Value and List Display
// ═══════════════════════════════════════════════════════════════════════════════

pub fn print_key_value(key: &str, value: &str) {
    println!(
        "  {} {} {}",
        box_chars::BULLET.with(colors::TEAL),
        format!("{}:", key).with(colors::DIM),
        value.with(colors::CREAM)
    );
}

pub fn print_key_value_highlight(key: &str, value: &str) {
    println!(
        "  {} {} {}",
        box_chars::DIAMOND.with(colors::AMBER),
        format!("{}:", key).with(colors::AMBER).bold(),
        value.with(colors::GREEN).bold()
    );
}

pub fn print_list_item(item: &str) {
    println!(
        "  {}  {}",
        box_chars::RECORD.with(colors::AMBER),
        item.with(colors::CREAM)
    );
}

pub fn print_empty_list(message: &str) {
    println!(
        "  {} {}",
        box_chars::BULLET_EMPTY.with(colors::DIM),
        message.with(colors::DIM).attribute(Attribute::Italic)
    );
}

// ═══════════════════════════════════════════════════════════════════════════════
// Table Display
// ═══════════════════════════════════════════════════════════════════════════════

/// Cut `s` to at most `max_width` terminal columns, ending with an ellipsis
/// when something was dropped. Never splits a grapheme.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let budget = max_width.saturating_sub(box_chars::ELLIPSIS.width());
    let mut out = String::new();
    let mut used = 0;
    for grapheme in s.graphemes(true) {
        let w = grapheme.width();
        if used + w > budget {
            break;
        }
        out.push_str(grapheme);
        used += w;
    }
    if max_width > 0 {
        out.push_str(box_chars::ELLIPSIS);
    }
    out
}

pub struct TableBuilder {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    col_widths: Vec<usize>,
    max_col_width: usize,
}

impl TableBuilder {
    pub fn new(headers: Vec<&str>) -> Self {
        let col_widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
        TableBuilder {
            headers: headers.into_iter().map(String::from).collect(),
            rows: Vec::new(),
            col_widths,
            max_col_width: 32,
        }
    }

    pub fn add_row(&mut self, row: Vec<&str>) {
        let row: Vec<String> = row
            .into_iter()
            .map(|cell| truncate_to_width(cell, self.max_col_width))
            .collect();
        for (i, cell) in row.iter().enumerate() {
            if i < self.col_widths.len() {
                self.col_widths[i] = self.col_widths[i].max(cell.width());
            }
        }
        self.rows.push(row);
    }

    fn print_border(&self, left: &str, junction: &str, right: &str) {
        print!("{}", left.with(colors::AMBER));
        for (i, width) in self.col_widths.iter().enumerate() {
            print!(
                "{}",
                box_chars::HORIZONTAL.repeat(width + 2).with(colors::AMBER)
            );
            if i + 1 < self.col_widths.len() {
                print!("{}", junction.with(colors::AMBER));
            }
        }
        println!("{}", right.with(colors::AMBER));
    }

    fn print_cells(&self, cells: &[String], color: CtColor, bold: bool) {
        print!("{}", box_chars::VERTICAL.with(colors::AMBER));
        for (i, cell) in cells.iter().enumerate() {
            let width = self.col_widths.get(i).copied().unwrap_or(0);
            let padding = width.saturating_sub(cell.width());
            let styled = cell.clone().with(color);
            if bold {
                print!(" {}{} ", styled.bold(), " ".repeat(padding));
            } else {
                print!(" {}{} ", styled, " ".repeat(padding));
            }
            print!("{}", box_chars::VERTICAL.with(colors::AMBER));
        }
        println!();
    }

    pub fn print(&self) {
        self.print_border(
            box_chars::ROUND_TOP_LEFT,
            box_chars::T_TOP,
            box_chars::ROUND_TOP_RIGHT,
        );
        self.print_cells(&self.headers, colors::AMBER, true);
        self.print_border(box_chars::T_LEFT, box_chars::CROSS, box_chars::T_RIGHT);
        for row in &self.rows {
            self.print_cells(row, colors::CREAM, false);
        }
        self.print_border(
            box_chars::ROUND_BOTTOM_LEFT,
            box_chars::T_BOTTOM,
            box_chars::ROUND_BOTTOM_RIGHT,
        );
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Prompt and Welcome
// ═══════════════════════════════════════════════════════════════════════════════

pub fn get_prompt() -> String {
    format!(
        "{} {} ",
        box_chars::RECORD.with(colors::AMBER).bold(),
        "❯".with(colors::TEAL).bold(),
    )
}

pub fn print_welcome(lines: &[(&str, String)]) {
    println!();
    println!(
        "  {} {}  {}",
        box_chars::RECORD.with(colors::AMBER).bold(),
        "VINYL CATALOG".with(colors::AMBER).bold(),
        format!("v{}", env!("CARGO_PKG_VERSION")).with(colors::DIM)
    );
    for (key, value) in lines {
        print_key_value(key, value);
    }
    println!(
        "  {}",
        "Type 'help' for available commands".with(colors::DIM)
    );
    println!();
}

// ═══════════════════════════════════════════════════════════════════════════════
// Help Display
// ═══════════════════════════════════════════════════════════════════════════════

pub struct CommandHelp {
    pub name: &'static str,
    pub args: &'static str,
    pub description: &'static str,
}

pub fn print_help(commands: &[CommandHelp]) {
    print_section_header("Available Commands");
    println!();

    fn group<'a>(commands: &'a [CommandHelp], names: &[&str]) -> Vec<&'a CommandHelp> {
        commands
            .iter()
            .filter(|c| names.contains(&c.name))
            .collect()
    }
    let browse = group(
        commands,
        &["list", "search", "genre", "sort", "genres", "stats", "show"],
    );
    let edit = group(commands, &["add", "edit", "delete"]);
    let system = group(commands, &["export", "reset", "where", "help", "exit"]);

    fn print_command_group(title: &str, commands: &[&CommandHelp], color: CtColor) {
        println!(
            "  {} {}",
            box_chars::DIAMOND.with(color),
            title.with(color).bold()
        );
        for cmd in commands {
            println!(
                "      {} {}  {}",
                cmd.name.with(colors::GREEN).bold(),
                cmd.args.with(colors::DIM),
                cmd.description.with(colors::CREAM)
            );
        }
        println!();
    }

    print_command_group("Browse", &browse, colors::TEAL);
    print_command_group("Edit", &edit, colors::AMBER);
    print_command_group("System", &system, colors::ORANGE);

    print_section_footer();
}

pub fn print_goodbye() {
    println!();
    println!(
        "  {} {}",
        box_chars::RECORD.with(colors::AMBER),
        "Goodbye! Keep spinning.".with(colors::AMBER).bold()
    );
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_keeps_short_text() {
        assert_eq!(truncate_to_width("Blue", 10), "Blue");
    }

    #[test]
    fn test_truncate_adds_ellipsis() {
        assert_eq!(truncate_to_width("Kind of Blue", 6), "Kind …");
        assert_eq!(truncate_to_width("Kind of Blue", 6).width(), 6);
    }

    #[test]
    fn test_truncate_counts_wide_characters() {
        // Each CJK character takes two columns.
        assert_eq!(truncate_to_width("坂本龍一", 5), "坂本…");
    }
}
