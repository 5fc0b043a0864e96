use std::io::{self, Write};

use tracing::warn;

use crate::filesystem::{FileSystemManager, FsError, Mode};

/// Size of the demo's `assignment.pdf`, 2.4 MiB.
const ASSIGNMENT_SIZE: u64 = 2_516_582;

/// Walks through the three directory structures on a scratch filesystem,
/// then shows metadata and the operation log.
pub fn run_demo(out: &mut impl Write) -> io::Result<()> {
    let mut fs = FileSystemManager::new(Mode::Single);
    let rule = "=".repeat(60);

    writeln!(out, "\n{rule}\nRUNNING DEMONSTRATION\n{rule}\n")?;
    writeln!(out, "1. Visual Directory Tree")?;

    writeln!(out, "\n- Single-Level Directory")?;
    for name in ["file1.txt", "file2.doc", "image.png"] {
        step(fs.create_file(name, None));
    }
    writeln!(out, "\n{}\n", fs.get_full_tree())?;
    writeln!(out, "All files are stored in one directory. No subfolders.\n")?;

    writeln!(out, "- Two-Level Directory")?;
    fs.switch_mode(Mode::TwoLevel);
    for (user, files) in [
        ("UserA", &["notes.txt", "photo.jpg"][..]),
        ("UserB", &["project.docx"][..]),
    ] {
        step(fs.create_directory(user));
        step(fs.change_directory(user));
        for file in files {
            step(fs.create_file(file, None));
        }
        step(fs.change_directory(".."));
    }
    writeln!(out, "\n{}\n", fs.get_full_tree())?;
    writeln!(out, "Each user has a separate folder.\n")?;

    writeln!(out, "- Hierarchical (Tree-Based) Directory")?;
    fs.switch_mode(Mode::Hierarchical);
    step(fs.create_directory("Documents"));
    step(fs.change_directory("Documents"));
    step(fs.create_directory("College"));
    step(fs.change_directory("College"));
    step(fs.create_file("assignment.pdf", Some(ASSIGNMENT_SIZE)));
    step(fs.change_directory(".."));
    step(fs.create_file("Resume.docx", None));
    step(fs.change_directory(".."));
    for (dir, file) in [("Pictures", "trip.png"), ("Music", "song.mp3")] {
        step(fs.create_directory(dir));
        step(fs.change_directory(dir));
        step(fs.create_file(file, None));
        step(fs.change_directory(".."));
    }
    writeln!(out, "\n{}\n", fs.get_full_tree())?;
    writeln!(out, "This supports multiple levels of folders inside folders.\n")?;

    writeln!(out, "2. File Metadata Display\n")?;
    step(fs.change_directory("Documents/College"));
    match fs.get_info("assignment.pdf") {
        Ok(info) => {
            for (label, value) in info.fields() {
                writeln!(out, "{label:<12}: {value}")?;
            }
        }
        Err(e) => warn!("Demo could not read metadata: {}", e),
    }

    writeln!(out, "\n3. Logs of Operations\n")?;
    fs.reset();
    step(fs.create_directory("Documents"));
    step(fs.change_directory("Documents"));
    step(fs.create_file("assignment.pdf", None));
    step(fs.rename("assignment.pdf", "final_assignment.pdf"));
    step(fs.delete("final_assignment.pdf", false));
    step(fs.change_directory(".."));
    step(fs.create_directory("Pictures"));
    step(fs.change_directory("Pictures"));
    step(fs.create_file("trip.png", None));
    step(fs.change_directory(".."));
    fs.search("trip.png");
    for entry in fs.get_logs() {
        writeln!(out, "{entry}")?;
    }

    writeln!(out, "\n{rule}\nDEMONSTRATION COMPLETE\n{rule}\n")?;
    Ok(())
}

fn step(result: Result<String, FsError>) {
    if let Err(e) = result {
        warn!("Demo step failed: {}", e);
    }
}
