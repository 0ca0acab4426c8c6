//! End-to-end test suite for deadimg-core.

use crate::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

fn write_file(file: &Path, content: &str) {
    fs::create_dir_all(file.parent().unwrap()).unwrap();
    fs::write(file, content).unwrap();
}

fn setup_temp_project() -> PathBuf {
    let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir()
        .join("deadimg_tests")
        .join(format!("{}_{}", timestamp, id));

    if dir.exists() {
        fs::remove_dir_all(&dir).ok();
    }
    fs::create_dir_all(dir.join("src")).unwrap();
    dir
}

fn unused_names(root: &Path, unused: &[PathBuf]) -> Vec<String> {
    unused.iter().map(|p| display_path(root, p)).collect()
}

fn analyze(root: &Path) -> AnalysisResult {
    Deadimg::new(root).image_dirs(["public"]).analyze().unwrap()
}

// Core Test 1: the App.ts scenario
#[test]
fn test_single_import_leaves_sibling_unused() {
    let root = setup_temp_project();
    write_file(&root.join("public/a.png"), "a");
    write_file(&root.join("public/b.png"), "b");
    write_file(&root.join("src/App.ts"), "import './a.png'");

    let outcome = Deadimg::new(&root).image_dirs(["public"]).run().unwrap();

    assert_eq!(
        unused_names(&root, &outcome.analysis.unused),
        vec!["public/b.png"]
    );
    assert_eq!(outcome.report.unused_count, 1);

    let on_disk = read_report(&outcome.report_path).unwrap();
    assert_eq!(on_disk, outcome.report);

    fs::remove_dir_all(&root).ok();
}

// Core Test 2: exact unused set on a mixed fixture
#[test]
fn test_fixture_exact_unused_set() {
    let root = setup_temp_project();
    for name in ["hero.jpg", "icon-close.svg", "bg_pattern.webp", "zzqx.png"] {
        write_file(&root.join("public").join(name), "img");
    }
    write_file(
        &root.join("src/components/Header.vue"),
        "<template><img src=\"/hero.jpg\"></template>",
    );
    write_file(
        &root.join("src/styles/main.scss"),
        ".body { background: url('../../public/bg_pattern.webp'); }",
    );
    write_file(
        &root.join("src/icons.ts"),
        "export const close = `${base}/icon-close.svg`",
    );

    let result = analyze(&root);

    assert_eq!(unused_names(&root, &result.unused), vec!["public/zzqx.png"]);
    assert_eq!(result.used.len(), 3);

    fs::remove_dir_all(&root).ok();
}

// Core Test 3: idempotence
#[test]
fn test_idempotent_runs() {
    let root = setup_temp_project();
    for name in ["qq2.png", "b.png", "qq1.png"] {
        write_file(&root.join("public").join(name), "img");
    }
    write_file(&root.join("src/main.js"), "load('b.png')");

    let first = analyze(&root);
    let second = analyze(&root);

    assert_eq!(first.unused, second.unused);
    assert_eq!(
        unused_names(&root, &first.unused),
        vec!["public/qq1.png", "public/qq2.png"]
    );

    fs::remove_dir_all(&root).ok();
}

// Core Test 4: monotonicity
#[test]
fn test_new_reference_removes_exactly_one_entry() {
    let root = setup_temp_project();
    for name in ["xa1.png", "xb2.png", "xc3.png"] {
        write_file(&root.join("public").join(name), "img");
    }
    write_file(&root.join("src/index.html"), "<div></div>");

    let before = analyze(&root);
    assert_eq!(before.unused.len(), 3);

    write_file(&root.join("src/Extra.jsx"), "<img src={require('../public/xb2.png')} />");
    let after = analyze(&root);

    let expected: Vec<PathBuf> = before
        .unused
        .iter()
        .filter(|p| !p.ends_with("xb2.png"))
        .cloned()
        .collect();
    assert_eq!(after.unused, expected);

    fs::remove_dir_all(&root).ok();
}

// Core Test 5: forward-slash references, independent of host separator
#[test]
fn test_forward_slash_relative_reference() {
    let root = setup_temp_project();
    let image = root.join("src").join("assets").join("img").join("qz.png");
    write_file(&image, "img");
    let source = root.join("src").join("pages").join("Home.vue");

    let target = ImageTarget::new(image.clone());
    let pattern = ReferencePattern::derive(&source, &target);
    assert_eq!(pattern.relative, "../assets/img/qz.png");

    write_file(&source, "<img :src=\"`../assets/img/qz.png`\">");
    let used = build_used_set(&[source], &[image.clone()]);
    assert!(used.contains(&image));

    fs::remove_dir_all(&root).ok();
}

// Core Test 6: quote style independence
#[test]
fn test_quote_styles_mark_used() {
    for text in ["'photo.png'", "\"photo.png\"", "photo.png"] {
        let root = setup_temp_project();
        let image = root.join("assets/photo.png");
        write_file(&image, "img");
        let source = root.join("src/view.ts");
        write_file(&source, text);

        let used = build_used_set(&[source], &[image.clone()]);
        assert!(used.contains(&image), "{} should mark photo.png used", text);

        fs::remove_dir_all(&root).ok();
    }
}

// Core Test 7: documented identifier over-match
#[test]
fn test_identifier_overmatch_logo_small_button() {
    let root = setup_temp_project();
    let image = root.join("public/logo.png");
    write_file(&image, "img");
    let source = root.join("src/Nav.tsx");
    write_file(&source, "export function Nav() { return <logoSmallButton /> }");

    let used = build_used_set(&[source], &[image.clone()]);

    assert!(used.contains(&image));
    assert!(identifier_containment("logoSmallButton", "logo"));

    fs::remove_dir_all(&root).ok();
}

// Core Test 8: concatenated paths
#[test]
fn test_concatenation_reference_marks_used() {
    let root = setup_temp_project();
    let image = root.join("public/img/banner.png");
    write_file(&image, "img");
    let source = root.join("src/banner.js");
    write_file(&source, "const url = base + 'banner' + ext;");

    let index = ReferenceIndex::with_detectors(vec![Box::new(ConcatenationReference)]);
    let outcome = index.build_used_set(&[source], &[image.clone()]);

    assert!(outcome.used.contains(&image));

    fs::remove_dir_all(&root).ok();
}

// Core Test 9: shared basename in different directories
#[test]
fn test_shared_basename_both_marked_used() {
    let root = setup_temp_project();
    write_file(&root.join("public/icons/close.svg"), "a");
    write_file(&root.join("public/legacy/close.svg"), "b");
    write_file(&root.join("src/Modal.vue"), "<img src=\"close.svg\">");

    let result = analyze(&root);

    assert!(result.unused.is_empty());

    fs::remove_dir_all(&root).ok();
}

// Core Test 10: fail-on-unused after the report is written
#[test]
fn test_fail_on_unused_after_report() {
    let root = setup_temp_project();
    write_file(&root.join("public/a.png"), "a");
    write_file(&root.join("public/qb.png"), "b");
    write_file(&root.join("src/App.ts"), "import './a.png'");

    let builder = Deadimg::new(&root)
        .image_dirs(["public"])
        .fail_on_unused(true);
    let err = builder.run().unwrap_err();

    assert!(matches!(err, DeadimgError::UnusedImages { count: 1 }));
    let report = read_report(&builder.report_path()).unwrap();
    assert_eq!(report.unused_count, 1);
    assert_eq!(report.unused_images.len(), 1);
    assert_eq!(report.unused_images[0].path, "public/qb.png");

    fs::remove_dir_all(&root).ok();
}

// Core Test 11: delete, then re-run reports nothing for the deleted paths
#[cfg(feature = "delete")]
#[test]
fn test_delete_then_rerun_is_clean() {
    let root = setup_temp_project();
    write_file(&root.join("public/a.png"), "a");
    write_file(&root.join("public/qb.png"), "b");
    write_file(&root.join("public/qc.gif"), "c");
    write_file(&root.join("src/App.ts"), "import './a.png'");

    let outcome = Deadimg::new(&root)
        .image_dirs(["public"])
        .delete_unused(true)
        .run()
        .unwrap();

    let deleted = outcome.deleted.unwrap();
    assert_eq!(deleted.files_removed.len(), 2);
    assert!(deleted.is_clean());
    assert!(!root.join("public/qb.png").exists());
    assert!(!root.join("public/qc.gif").exists());
    assert!(root.join("public/a.png").exists());

    let rerun = Deadimg::new(&root).image_dirs(["public"]).run().unwrap();
    assert_eq!(rerun.report.unused_count, 0);
    assert_eq!(rerun.analysis.images.len(), 1);

    fs::remove_dir_all(&root).ok();
}

// Core Test 12: dry-run keeps files
#[cfg(feature = "delete")]
#[test]
fn test_delete_dry_run_keeps_files() {
    let root = setup_temp_project();
    write_file(&root.join("public/qb.png"), "b");
    write_file(&root.join("src/App.ts"), "");

    let outcome = Deadimg::new(&root)
        .image_dirs(["public"])
        .delete_unused(true)
        .dry_run(true)
        .run()
        .unwrap();

    assert_eq!(outcome.deleted.unwrap().files_removed.len(), 1);
    assert!(root.join("public/qb.png").exists());

    fs::remove_dir_all(&root).ok();
}

// Core Test 13: parallel and sequential agree
#[test]
fn test_parallel_equals_sequential() {
    let root = setup_temp_project();
    for i in 0..20 {
        write_file(&root.join(format!("public/img_q{:02}.png", i)), "img");
    }
    for i in 0..40 {
        let body = if i % 3 == 0 {
            format!("import x from '../public/img_q{:02}.png'", i / 2)
        } else {
            "export {}".to_string()
        };
        write_file(&root.join(format!("src/m{}.ts", i)), &body);
    }

    let par = Deadimg::new(&root).image_dirs(["public"]).analyze().unwrap();
    let seq = Deadimg::new(&root)
        .image_dirs(["public"])
        .parallel(false)
        .analyze()
        .unwrap();

    assert_eq!(par.used, seq.used);
    assert_eq!(par.unused, seq.unused);
    assert!(!par.unused.is_empty());

    fs::remove_dir_all(&root).ok();
}

// Core Test 14: usage recorded by one file survives another file failing
#[test]
fn test_unreadable_source_never_removes_usage() {
    let root = setup_temp_project();
    let image = root.join("public/a.png");
    write_file(&image, "img");
    let good = root.join("src/App.ts");
    write_file(&good, "import './a.png'");
    let gone = root.join("src/Deleted.ts");

    let outcome = ReferenceIndex::new().build_used_set(&[good, gone.clone()], &[image.clone()]);

    assert!(outcome.used.contains(&image));
    assert_eq!(outcome.unreadable, vec![gone]);
    assert_eq!(compute_unused(&[image], &outcome.used), Vec::<PathBuf>::new());

    fs::remove_dir_all(&root).ok();
}

// Core Test 15: config file drives the builder
#[test]
fn test_config_file_drives_builder() {
    let root = setup_temp_project();
    write_file(&root.join("static/qa.png"), "a");
    write_file(&root.join("static/fixtures/qf.png"), "f");
    write_file(&root.join("src/App.ts"), "");
    write_file(
        &root.join(CONFIG_FILE),
        "image_dirs = [\"static\"]\nexclude = [\"**/fixtures/**\"]\noutput_file = \"out/r.json\"\n",
    );

    let cfg = load_config(&root).unwrap().unwrap();
    let outcome = Deadimg::from_config(&root, &cfg).run().unwrap();

    assert_eq!(
        unused_names(&root, &outcome.analysis.unused),
        vec!["static/qa.png"]
    );
    assert!(root.join("out/r.json").exists());

    fs::remove_dir_all(&root).ok();
}

// Core Test 16: images are never treated as sources
#[test]
fn test_used_subset_of_discovered() {
    let root = setup_temp_project();
    write_file(&root.join("src/assets/qa.png"), "a");
    write_file(&root.join("src/App.vue"), "<img src='./assets/qa.png'>");
    write_file(&root.join("src/other.ts"), "missing.png");

    let result = Deadimg::new(&root).analyze().unwrap();

    assert!(result.used.iter().all(|u| result.images.contains(u)));
    assert!(result.unused.iter().all(|u| !result.used.contains(u)));
    assert_eq!(result.used.len() + result.unused.len(), result.images.len());

    fs::remove_dir_all(&root).ok();
}
