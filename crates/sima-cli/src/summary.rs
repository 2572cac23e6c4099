use console::Style;
use sima_core::channel::ChannelAssignment;
use sima_core::frame::SourceInfo;
use sima_core::metadata::CanonicalImageMetadata;
use sima_core::pipeline::config::{BatchConfig, BatchMode};
use sima_core::pipeline::BatchSummary;
use sima_core::presets::PresetTable;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

fn print_title(s: &Styles, title: &str) {
    println!();
    println!("  {}", s.title.apply_to(title));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(title.chars().count())));
    println!();
}

pub fn print_batch_summary(config: &BatchConfig, assignment: Option<&ChannelAssignment>) {
    let s = Styles::new();

    let title = match config.mode {
        BatchMode::Split => "SImA Split",
        BatchMode::Index => "SImA Index",
    };
    print_title(&s, title);

    for input in &config.inputs {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Input"),
            s.path.apply_to(input.display())
        );
    }
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(config.output_dir.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Index"),
        s.path.apply_to(config.index_path().display())
    );
    if !config.recursive {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Recursive"),
            s.disabled.apply_to("off")
        );
    }
    println!();

    let Some(assignment) = assignment else {
        return;
    };

    println!("  {}", s.header.apply_to("Channels"));
    for (i, slot) in assignment.slots().iter().enumerate() {
        println!(
            "    {}. {:<28}{} {}",
            s.label.apply_to(i + 1),
            s.value.apply_to(&slot.name),
            s.method.apply_to(slot.acquisition_type),
            s.label.apply_to(&slot.color)
        );
    }
    println!(
        "    {:<12}{}",
        s.label.apply_to("Format"),
        s.value.apply_to(config.output_format)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Per well"),
        if config.group_by_well {
            s.method.apply_to("yes")
        } else {
            s.disabled.apply_to("no")
        }
    );
    println!();
}

pub fn print_batch_result(summary: &BatchSummary) {
    let s = Styles::new();

    println!();
    println!(
        "  {:<14}{}",
        s.label.apply_to("Files"),
        s.value.apply_to(summary.files_processed)
    );
    if summary.frames_written > 0 {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Frames"),
            s.value.apply_to(summary.frames_written)
        );
    }
    println!(
        "  {:<14}{}",
        s.label.apply_to("Index rows"),
        s.value.apply_to(summary.rows_indexed)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Index"),
        s.path.apply_to(summary.index_path.display())
    );
}

pub fn print_stack_info(info: &SourceInfo, metadata: Option<&CanonicalImageMetadata>) {
    let s = Styles::new();
    print_title(&s, "Stack");

    let row = |label: &str, value: String| {
        println!("  {:<16}{}", s.label.apply_to(label), s.value.apply_to(value));
    };

    println!(
        "  {:<16}{}",
        s.label.apply_to("File"),
        s.path.apply_to(info.filename.display())
    );
    row("Frames", info.total_frames.to_string());
    row("Dimensions", format!("{}x{}", info.width, info.height));
    row("Bit depth", info.bit_depth.to_string());
    row("Samples/pixel", info.samples_per_pixel.to_string());
    println!();

    let Some(m) = metadata else {
        println!(
            "  {:<16}{}",
            s.header.apply_to("Metadata"),
            s.disabled.apply_to("not found")
        );
        return;
    };

    let opt = |v: Option<String>| v.unwrap_or_else(|| "-".to_string());

    println!("  {}", s.header.apply_to("Metadata"));
    row("Plate", opt(m.plate_name.clone()));
    row("Measured", m.measurement.iso.clone());
    row("Well", format!("{} (row {}, col {})", m.well_id, m.row, m.column));
    row(
        "Fields",
        format!("{} ({}x{})", m.num_fields, m.vertical_total, m.horizontal_total),
    );
    row("Exposure", format!("{} s", m.exposure_time_s));
    row("Channel", opt(m.channel_name.clone()));
    row("Emission", opt(m.emission_wavelength_nm.map(|v| format!("{v} nm"))));
    row(
        "Excitation",
        opt(m.excitation_wavelength_nm.map(|v| format!("{v} nm"))),
    );
    row("Channels", opt(m.num_channels.map(|v| v.to_string())));
    row("Timepoints", opt(m.num_timepoints.map(|v| v.to_string())));
    row("Image size", format!("{}x{}", m.image_width, m.image_height));
    row("Objective", format!("{}x", m.objective_magnification));
    row("NA", opt(m.objective_na.map(|v| v.to_string())));
    row(
        "Pixel pitch",
        format!("{} x {} um", m.resolution_x_um, m.resolution_y_um),
    );

    if let Some(channels) = m.num_channels {
        let frames = info.total_frames as u32;
        if channels > 0 && frames % channels != 0 {
            println!();
            println!(
                "  {}",
                s.disabled.apply_to(format!(
                    "{frames} frames do not divide evenly into {channels} channels"
                ))
            );
        }
    }
}

pub fn print_presets(table: &PresetTable) {
    let s = Styles::new();
    print_title(&s, "Channel Presets");

    for (i, preset) in table.iter().enumerate() {
        println!(
            "  {:>3}. {:<42}{:<12}{} {}",
            s.label.apply_to(i + 1),
            s.value.apply_to(&preset.name),
            s.method.apply_to(preset.acquisition_type),
            s.label.apply_to(&preset.color),
            s.label.apply_to(&preset.channel_type)
        );
    }
    println!();
}
