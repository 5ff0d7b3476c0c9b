//! Factories for the built-in child tags.

use std::rc::Rc;

use milk_markup::Element as Markup;

use super::attrs::{color, color_and_number, flag, h_align, number, number_f64, parse_number};
use super::registry::{BuildCtx, TagFactory, TagRegistry};
use crate::constraints::Edges;
use crate::widget::Element;
use crate::widgets::{
    Button, Calendar, Clock, ClockStyle, Container, Gauge, GaugeStyle, Graph, GraphType, Image, Layout, ProgressBar,
    Spacer, Text,
};

/// Default size of `<spacer>`.
const SPACER_SIZE: f32 = 10.0;
/// Radius of a `glow` given without one.
const TEXT_GLOW_RADIUS: f32 = 10.0;

pub(super) fn register_all(r: &mut TagRegistry) {
    let add = |r: &mut TagRegistry, tags: &[&str], f: fn(&Markup, &BuildCtx<'_>) -> Option<Element>| {
        let factory: TagFactory = Rc::new(f);
        r.register_aliases(tags, factory);
    };
    add(r, &["text", "label"], text);
    add(r, &["title"], title);
    add(r, &["progress", "progressbar", "progress-bar"], progress);
    add(r, &["graph", "chart"], graph);
    add(r, &["gauge", "meter"], gauge);
    add(r, &["image", "img"], image);
    add(r, &["button"], button);
    add(r, &["spacer", "space"], spacer);
    add(r, &["clock"], clock);
    add(r, &["calendar"], calendar);
    add(r, &["container", "box", "vbox", "hbox"], container);
}

// ── text ──────────────────────────────────────────────────────────────────

fn text(m: &Markup, _: &BuildCtx<'_>) -> Option<Element> {
    let mut t = Text::new(m.text());
    if let Some(c) = color(m, "color") {
        t.set_color(c);
    }
    if let Some(font) = m.attr("font") {
        let mut parts = font.split_whitespace();
        if let Some(family) = parts.next() {
            let size = parts.next().and_then(parse_number).unwrap_or(t.text_style().size);
            t.set_font(family, size);
        }
    }
    if let Some(size) = number(m, "size") {
        t.set_font_size(size);
    }
    if let Some(b) = flag(m, "bold") {
        t.set_bold(b);
    }
    if let Some(i) = flag(m, "italic") {
        t.set_italic(i);
    }
    if let Some(a) = m.attr("align").and_then(h_align) {
        t.set_align(a);
    }
    if let Some((c, radius)) = m.attr("glow").and_then(color_and_number) {
        t.set_glow(c, radius.unwrap_or(TEXT_GLOW_RADIUS));
    }
    match m.attr("style").map(str::to_ascii_lowercase).as_deref() {
        Some("title") => t.set_title(),
        Some("subtitle") => t.set_subtitle(),
        Some("body") => t.set_body(),
        Some("caption") => t.set_caption(),
        Some("monospace" | "mono") => t.set_monospace(),
        Some("code") => t.set_code(),
        _ => {}
    }
    Some(t.into())
}

fn title(m: &Markup, _: &BuildCtx<'_>) -> Option<Element> {
    let mut t = Text::title(m.text());
    if let Some(c) = color(m, "color") {
        t.set_color(c);
    }
    Some(t.into())
}

// ── meters ────────────────────────────────────────────────────────────────

fn progress(m: &Markup, _: &BuildCtx<'_>) -> Option<Element> {
    let mut bar = ProgressBar::new();
    if let Some(min) = number_f64(m, "min") {
        bar.set_min(min);
    }
    if let Some(max) = number_f64(m, "max") {
        bar.set_max(max);
    }
    if let Some(v) = number_f64(m, "value") {
        bar.set_value(v);
    }
    if let (Some(bg), Some(fill)) = (color(m, "background"), color(m, "fill")) {
        bar.set_colors(bg, fill);
    }
    if let (Some(bg), Some(fill)) = (color(m, "bg"), color(m, "color")) {
        bar.set_colors(bg, fill);
    }
    if let Some(r) = number(m, "rounded") {
        bar.set_rounded(r);
    }
    if let Some(h) = number(m, "height") {
        bar.set_height(h);
    }
    if let Some(show) = flag(m, "show-text") {
        bar.set_show_text(show);
    }
    if let Some(fmt) = m.attr("format") {
        bar.set_text_format(fmt);
    }
    Some(bar.into())
}

fn graph(m: &Markup, _: &BuildCtx<'_>) -> Option<Element> {
    let mut g = Graph::new();
    if let Some(kind) = m.attr("type").and_then(|t| t.parse::<GraphType>().ok()) {
        g.set_type(kind);
    }
    if let Some(c) = color(m, "color") {
        g.set_line_color(c);
    }
    if let Some(c) = color(m, "fill") {
        g.set_fill_color(c);
    }
    if let Some(n) = number(m, "max-points") {
        g.set_max_points(n.max(0.0) as usize);
    }
    if let Some(min) = number_f64(m, "min") {
        g.set_min(min);
    }
    if let Some(max) = number_f64(m, "max") {
        g.set_max(max);
    }
    if let Some(on) = flag(m, "grid") {
        g.set_show_grid(on);
    }
    if let Some(on) = flag(m, "auto-scale") {
        g.set_auto_scale(on);
    }
    Some(g.into())
}

fn gauge(m: &Markup, _: &BuildCtx<'_>) -> Option<Element> {
    let mut g = Gauge::new();
    if let (Some(min), Some(max)) = (number_f64(m, "min"), number_f64(m, "max")) {
        g.set_range(min, max);
    }
    if let Some(v) = number_f64(m, "value") {
        g.set_value(v);
    }
    if let Some(style) = m.attr("style").and_then(|s| s.parse::<GaugeStyle>().ok()) {
        g.set_style(style);
    }
    if let Some(t) = number(m, "thickness") {
        g.set_thickness(t);
    }
    if let Some(l) = m.attr("label") {
        g.set_label(l);
    }
    if let Some(u) = m.attr("unit") {
        g.set_unit(u);
    }
    Some(g.into())
}

// ── media & controls ──────────────────────────────────────────────────────

fn image(m: &Markup, ctx: &BuildCtx<'_>) -> Option<Element> {
    let mut img = match m.attr_any(&["src", "source"]) {
        Some(src) => Image::from_path(ctx.resolve(src)),
        None => Image::new(),
    };
    if let Some(r) = number(m, "rounded") {
        img.set_rounded(r);
    }
    if let Some(on) = flag(m, "circular") {
        img.set_circular(on);
    }
    if let Some(o) = number(m, "opacity") {
        img.set_opacity(o);
    }
    Some(img.into())
}

fn button(m: &Markup, _: &BuildCtx<'_>) -> Option<Element> {
    let label = m.attr("text").map(str::to_string).unwrap_or_else(|| m.text());
    let mut b = Button::new(label);
    if let Some(c) = color(m, "background") {
        b.set_background(c);
    }
    if let Some(c) = color(m, "color") {
        b.set_text_color(c);
    }
    if let Some(r) = number(m, "rounded") {
        b.set_rounded(r);
    }
    Some(b.into())
}

fn spacer(m: &Markup, _: &BuildCtx<'_>) -> Option<Element> {
    Some(Spacer::new(number(m, "size").unwrap_or(SPACER_SIZE)).into())
}

fn clock(m: &Markup, _: &BuildCtx<'_>) -> Option<Element> {
    let style = m.attr("style").and_then(|s| s.parse::<ClockStyle>().ok()).unwrap_or(ClockStyle::Digital);
    let mut c = Clock::new(style);
    if let Some(f) = m.attr("format") {
        c.set_format(f);
    }
    if let Some(col) = color(m, "color") {
        c.set_text_color(col);
    }
    if let Some(on) = flag(m, "show-seconds") {
        c.set_show_seconds(on);
    }
    if let Some(on) = flag(m, "show-date") {
        c.set_show_date(on);
    }
    if let Some(on) = flag(m, "24hour") {
        c.set_24_hour(on);
    }
    Some(c.into())
}

fn calendar(_: &Markup, _: &BuildCtx<'_>) -> Option<Element> {
    Some(Calendar::new().into())
}

// ── layout ────────────────────────────────────────────────────────────────

fn container(m: &Markup, ctx: &BuildCtx<'_>) -> Option<Element> {
    let layout = if m.name.eq_ignore_ascii_case("hbox") {
        Layout::Horizontal
    } else {
        match m.attr("layout").and_then(Layout::parse) {
            Some(Layout::Grid { .. }) => {
                let columns = number(m, "columns").map_or(Layout::DEFAULT_GRID_COLUMNS, |c| c.max(1.0) as usize);
                Layout::Grid { columns }
            }
            Some(l) => l,
            None => Layout::Vertical,
        }
    };
    let mut c = Container::new(layout);
    if let Some(s) = number(m, "spacing") {
        c.set_spacing(s);
    }
    if let Some(margin) = number(m, "margin") {
        c.set_margins(Edges::all(margin));
    }
    if let Some(bg) = color(m, "background") {
        c.set_background(bg);
    }
    for child in ctx.build_children(m) {
        c.push(child);
    }
    Some(c.into())
}
