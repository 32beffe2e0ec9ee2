//! Default series colors, same order the web dashboard's chart library uses

use ratatui::style::Color;

pub const PALETTE: [Color; 7] = [
    Color::Rgb(54, 162, 235),
    Color::Rgb(255, 99, 132),
    Color::Rgb(255, 159, 64),
    Color::Rgb(255, 205, 86),
    Color::Rgb(75, 192, 192),
    Color::Rgb(153, 102, 255),
    Color::Rgb(201, 203, 207),
];

pub fn color(index: usize) -> Color {
    PALETTE[index % PALETTE.len()]
}
