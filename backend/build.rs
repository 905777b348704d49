use std::fs;
use std::path::Path;

const PLACEHOLDER_INDEX: &str = "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>Middleware Console</title></head>\
<body><p>The console has not been built. Run <code>trunk build --release</code> in <code>frontend/</code> and rebuild the server.</p></body></html>";

fn main() {
    let out_dir = Path::new("static/dist");
    let dist_dir = Path::new("../frontend/dist");

    if dist_dir.exists() {
        let _ = fs::remove_dir_all(out_dir);
        fs::create_dir_all(out_dir).expect("create static/dist");
        fs_extra::dir::copy(
            dist_dir,
            out_dir,
            &fs_extra::dir::CopyOptions::new().overwrite(true).content_only(true),
        )
        .expect("copy frontend/dist");
    } else {
        fs::create_dir_all(out_dir).expect("create static/dist");
    }

    let index = out_dir.join("index.html");
    if !index.exists() {
        fs::write(&index, PLACEHOLDER_INDEX).expect("write placeholder index.html");
    }

    println!("cargo:rerun-if-changed=../frontend/dist");
}
