use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use log::info;
use nifti_view::{AxisRoles, Viewer};
use std::{
    cell::Cell,
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
    rc::Rc,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Browse the planes of a 4-D NIfTI volume")]
struct Args {
    /// Volume to open (.nii or .nii.gz)
    path: Option<PathBuf>,

    /// Initial position on the image axis
    #[arg(short, long, default_value_t = 0)]
    image: usize,

    /// Initial position on the slice axis
    #[arg(short, long, default_value_t = 0)]
    slice: usize,

    /// Where the rendered plane is written
    #[arg(short, long, default_value = "slice.png")]
    output: PathBuf,

    /// Read navigation commands from stdin, re-rendering after each change
    #[arg(long)]
    interactive: bool,

    /// Volume axis navigated as "image"
    #[arg(long, default_value_t = 2)]
    primary_axis: usize,

    /// Volume axis navigated as "slice"
    #[arg(long, default_value_t = 3)]
    secondary_axis: usize,
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Load(PathBuf),
    NextImage,
    PrevImage,
    NextSlice,
    PrevSlice,
    Image(usize),
    Slice(usize),
    Info,
    Help,
    Quit,
}

impl Command {
    fn parse(line: &str) -> Result<Option<Command>> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(None);
        };
        let argument = words.collect::<Vec<_>>().join(" ");

        let index = || -> Result<usize> {
            argument
                .parse()
                .map_err(|_| anyhow!("`{name}` expects a non-negative index, got `{argument}`"))
        };

        let command = match name {
            "load" | "open" => {
                if argument.is_empty() {
                    bail!("`load` expects a path");
                }
                Command::Load(PathBuf::from(&argument))
            }
            "next-image" | "n" => Command::NextImage,
            "prev-image" | "p" => Command::PrevImage,
            "next-slice" | "N" => Command::NextSlice,
            "prev-slice" | "P" => Command::PrevSlice,
            "image" => Command::Image(index()?),
            "slice" => Command::Slice(index()?),
            "info" => Command::Info,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => bail!("Unknown command `{other}`, try `help`"),
        };
        Ok(Some(command))
    }
}

const HELP: &str = "\
Commands:
  load <path>        open a .nii or .nii.gz volume
  next-image, n      move to the next image
  prev-image, p      move to the previous image
  next-slice, N      move to the next slice
  prev-slice, P      move to the previous slice
  image <n>          jump to image n (clamped)
  slice <n>          jump to slice n (clamped)
  info               show shape and position
  quit, q            leave";

fn save(viewer: &Viewer, output: &Path) -> Result<()> {
    let image = viewer.render()?;
    image
        .save(output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    info!("Wrote {}", output.display());
    Ok(())
}

fn print_info(viewer: &Viewer) {
    println!("{}", viewer.current_shape_label());
    if viewer.is_loaded() {
        let selection = viewer.selection();
        let max = viewer.selector().max();
        println!(
            "Image {}/{}, slice {}/{}",
            selection.primary, max.primary, selection.secondary, max.secondary
        );
    }
}

fn apply(viewer: &mut Viewer, command: Command) {
    match command {
        Command::Load(path) => match viewer.load(&path) {
            Ok(()) => println!("{}", viewer.current_shape_label()),
            Err(err) => println!("Could not load {}: {err}", path.display()),
        },
        Command::NextImage => {
            viewer.next_image();
        }
        Command::PrevImage => {
            viewer.prev_image();
        }
        Command::NextSlice => {
            viewer.next_slice();
        }
        Command::PrevSlice => {
            viewer.prev_slice();
        }
        Command::Image(value) => {
            viewer.set_image(value);
        }
        Command::Slice(value) => {
            viewer.set_slice(value);
        }
        Command::Info => print_info(viewer),
        Command::Help => println!("{HELP}"),
        Command::Quit => {}
    }
}

fn prompt() -> io::Result<()> {
    print!("> ");
    io::stdout().flush()
}

fn run_interactive(viewer: &mut Viewer, dirty: &Cell<bool>, output: &Path) -> Result<()> {
    println!("{HELP}");
    if dirty.replace(false) && viewer.is_loaded() {
        save(viewer, output)?;
    }

    prompt()?;
    for line in io::stdin().lock().lines() {
        match Command::parse(&line?) {
            Ok(Some(Command::Quit)) => break,
            Ok(Some(command)) => apply(viewer, command),
            Ok(None) => {}
            Err(err) => println!("{err}"),
        }

        if dirty.replace(false) {
            match save(viewer, output) {
                Ok(()) => print_info(viewer),
                Err(err) => println!("{err:#}"),
            }
        }
        prompt()?;
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let args = Args::parse();
    let roles = AxisRoles::new(args.primary_axis, args.secondary_axis)?;
    let mut viewer = Viewer::with_roles(roles);

    let dirty = Rc::new(Cell::new(false));
    let flag = Rc::clone(&dirty);
    viewer.on_selection_changed(move |_| flag.set(true));

    if let Some(path) = &args.path {
        viewer
            .load(path)
            .with_context(|| format!("failed to load {}", path.display()))?;
        viewer.set_image(args.image);
        viewer.set_slice(args.slice);
        println!("{}", viewer.current_shape_label());
    }

    if args.interactive {
        return run_interactive(&mut viewer, &dirty, &args.output);
    }

    if !viewer.is_loaded() {
        bail!("no volume given, pass a PATH or use --interactive");
    }
    save(&viewer, &args.output)
}
