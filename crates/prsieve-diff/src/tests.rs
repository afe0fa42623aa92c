use super::*;
use std::collections::BTreeSet;

fn builtin_patterns() -> Vec<IgnorePattern> {
    BUILTIN_PATTERNS
        .iter()
        .map(|(raw, kind)| IgnorePattern::with_kind(raw, *kind).unwrap())
        .collect()
}

fn patterns_with(extra: &[&str]) -> Vec<IgnorePattern> {
    let mut patterns = builtin_patterns();
    patterns.extend(extra.iter().map(|raw| IgnorePattern::new(raw).unwrap()));
    patterns
}

const MIXED_DIFF: &str = r#"diff --git a/src/index.js b/src/index.js
index 1234567..89abcde 100644
--- a/src/index.js
+++ b/src/index.js
@@ -1,2 +1,3 @@
 const app = require('express')();
+app.use(require('cors')());
 app.listen(3000);
diff --git a/dist/bundle.js b/dist/bundle.js
index 1111111..2222222 100644
--- a/dist/bundle.js
+++ b/dist/bundle.js
@@ -1 +1 @@
-var a=1;
+var a=2;
diff --git a/package-lock.json b/package-lock.json
index 3333333..4444444 100644
--- a/package-lock.json
+++ b/package-lock.json
@@ -10,3 +10,6 @@
+    "node_modules/cors": {
+      "version": "2.8.5"
+    },
diff --git a/web/node_modules/left-pad/index.js b/web/node_modules/left-pad/index.js
index 5555555..6666666 100644
--- a/web/node_modules/left-pad/index.js
+++ b/web/node_modules/left-pad/index.js
@@ -1 +1 @@
-module.exports = 1;
+module.exports = 2;"#;

#[test]
fn test_split_empty_input() {
    assert!(split_diff_by_file("").is_empty());
}

#[test]
fn test_split_multiple_files_in_order() {
    let blocks = split_diff_by_file(MIXED_DIFF);
    let paths: Vec<&str> = blocks.iter().map(|b| b.path.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "src/index.js",
            "dist/bundle.js",
            "package-lock.json",
            "web/node_modules/left-pad/index.js",
        ]
    );
    assert!(blocks[0].raw_block.starts_with("diff --git a/src/index.js"));
    assert!(blocks[0].raw_block.ends_with(" app.listen(3000);"));
}

#[test]
fn test_split_discards_leading_preamble() {
    let diff = "From abc Mon Sep 17 00:00:00 2001\nSubject: tweak\n\ndiff --git a/a.txt b/a.txt\n+x";
    let blocks = split_diff_by_file(diff);
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].path, "a.txt");
    assert_eq!(blocks[0].raw_block, "diff --git a/a.txt b/a.txt\n+x");
}

#[test]
fn test_split_deleted_file_uses_old_path() {
    let diff = "diff --git a/gone.txt b//dev/null\ndeleted file mode 100644";
    let blocks = split_diff_by_file(diff);
    assert_eq!(blocks[0].path, "gone.txt");
}

#[test]
fn test_split_renamed_file_uses_new_path() {
    let diff = r#"diff --git a/old_name.txt b/new_name.txt
similarity index 100%
rename from old_name.txt
rename to new_name.txt"#;
    let blocks = split_diff_by_file(diff);
    assert_eq!(blocks[0].path, "new_name.txt");
}

#[test]
fn test_split_drops_unparsable_header() {
    let diff = "diff --git broken-header\n+x\ndiff --git a/ok.txt b/ok.txt\n+y";
    let blocks = split_diff_by_file(diff);
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].path, "ok.txt");
}

#[test]
fn test_split_handles_crlf_headers() {
    let diff = "diff --git a/win.txt b/win.txt\r\n+x\r\n";
    let blocks = split_diff_by_file(diff);
    assert_eq!(blocks[0].path, "win.txt");
}

#[test]
fn test_classify_priority() {
    let patterns = builtin_patterns();
    assert_eq!(classify("yarn.lock", &patterns), BlockDisposition::Excluded);
    assert_eq!(
        classify("package-lock.json", &patterns),
        BlockDisposition::LockfileSummarized
    );
    assert_eq!(
        classify("src/main.rs", &patterns),
        BlockDisposition::PassedThrough
    );
}

#[test]
fn test_cleanse_mixed_diff() {
    let outcome = cleanse_with_patterns(MIXED_DIFF, &patterns_with(&["dist/"]));
    let summary = &outcome.summary;

    let excluded: Vec<&str> = summary.excluded.iter().map(|e| e.path.as_str()).collect();
    assert_eq!(
        excluded,
        vec!["dist/bundle.js", "web/node_modules/left-pad/index.js"]
    );
    assert!(summary.excluded.iter().all(|e| e.reason == EXCLUSION_REASON));

    assert_eq!(summary.lockfile_summaries.len(), 1);
    assert_eq!(summary.lockfile_summaries[0].path, "package-lock.json");
    assert!(summary.lockfile_summaries[0].summary.contains("cors"));

    let diff = &outcome.cleansed_diff;
    assert!(diff.contains("require('express')"));
    assert!(diff.contains("+app.use(require('cors')());"));
    assert!(!diff.contains("var a=2;"));
    assert!(!diff.contains("module.exports = 2;"));
    assert!(diff.contains("### [lockfile要約] package-lock.json"));
    assert!(!diff.contains("+++ b/package-lock.json"));
    assert!(!diff.contains("@@ -10,3 +10,6 @@"));
}

#[test]
fn test_cleansed_layout() {
    let outcome = cleanse_with_patterns(MIXED_DIFF, &patterns_with(&["dist/"]));
    let diff = &outcome.cleansed_diff;

    let expected_header = [
        "---",
        "【AIレビュー用にクレンジング済み】",
        "以下は .gitignore 除外・lockfile 要約適用後の diff です。",
        "",
        "### 除外したファイル（全文は渡していません）",
        "- `dist/bundle.js` (.gitignore or built-in rule)",
        "- `web/node_modules/left-pad/index.js` (.gitignore or built-in rule)",
        "",
        "### lockfile の扱い",
        "lockfile の diff 全文は渡していません。以下の要約のみ AI 入力に含めています。",
    ]
    .join("\n");
    assert!(diff.starts_with(&expected_header));

    // header, blank separator, then the body in original order
    let body_start = diff
        .find("---\n\n\ndiff --git a/src/index.js")
        .expect("body follows header separator");
    let lockfile_at = diff.find("### [lockfile要約]").unwrap();
    assert!(body_start < lockfile_at);
}

#[test]
fn test_cleanse_without_changes_keeps_body() {
    let diff = "diff --git a/a.txt b/a.txt\n+hello";
    let outcome = cleanse_with_patterns(diff, &builtin_patterns());

    assert!(outcome.summary.is_empty());
    assert_eq!(
        outcome.cleansed_diff,
        format!("{}\n\n{}", build_cleansed_header(&[], &[]), diff)
    );
}

#[test]
fn test_every_block_lands_in_exactly_one_category() {
    let patterns = patterns_with(&["dist/"]);
    let outcome = cleanse_with_patterns(MIXED_DIFF, &patterns);

    let all: BTreeSet<String> = split_diff_by_file(MIXED_DIFF)
        .into_iter()
        .map(|b| b.path)
        .collect();
    let excluded: Vec<String> = outcome.summary.excluded.iter().map(|e| e.path.clone()).collect();
    let lockfiles: Vec<String> = outcome
        .summary
        .lockfile_summaries
        .iter()
        .map(|l| l.path.clone())
        .collect();
    let passed: Vec<String> = all
        .iter()
        .filter(|p| classify(p, &patterns) == BlockDisposition::PassedThrough)
        .cloned()
        .collect();

    let mut union = BTreeSet::new();
    let total = excluded.len() + lockfiles.len() + passed.len();
    union.extend(excluded);
    union.extend(lockfiles);
    union.extend(passed);

    assert_eq!(union, all);
    assert_eq!(total, all.len());
}

#[test]
fn test_cleanse_is_deterministic() {
    let patterns = patterns_with(&["dist/"]);
    let first = cleanse_with_patterns(MIXED_DIFF, &patterns);
    let second = cleanse_with_patterns(MIXED_DIFF, &patterns);
    assert_eq!(first, second);
}

#[test]
fn test_comment_for_empty_summary() {
    let md = format_cleansing_summary_for_comment(&CleansingSummary::default());
    assert_eq!(
        md,
        "### AI Input Cleansing Summary\n\n除外・要約はありません（diff をそのまま AI に渡しています）。"
    );
}

#[test]
fn test_comment_caps_excluded_list() {
    let summary = CleansingSummary {
        excluded: (0..31)
            .map(|i| ExclusionRecord {
                path: format!("gen/file{}.js", i),
                reason: EXCLUSION_REASON.to_string(),
            })
            .collect(),
        lockfile_summaries: Vec::new(),
    };

    let md = format_cleansing_summary_for_comment(&summary);
    assert!(md.contains("**除外したファイル: 31 件**"));
    assert!(md.contains("- `gen/file29.js` — .gitignore or built-in rule"));
    assert!(!md.contains("gen/file30.js"));
    assert!(md.contains("- … 他 1 件"));
    assert!(!md.contains("lockfile を要約して渡したファイル"));
}

#[test]
fn test_comment_lists_all_lockfiles() {
    let summary = CleansingSummary {
        excluded: Vec::new(),
        lockfile_summaries: (0..35)
            .map(|i| LockfileSummary {
                path: format!("pkg{}/package-lock.json", i),
                summary: "1 行追加, 0 行削除".to_string(),
            })
            .collect(),
    };

    let md = format_cleansing_summary_for_comment(&summary);
    assert!(md.contains("**lockfile を要約して渡したファイル: 35 件**"));
    assert!(md.contains("- `pkg34/package-lock.json`: 1 行追加, 0 行削除"));
    assert!(!md.contains("除外したファイル"));
}

#[test]
fn test_format_lockfile_block() {
    assert_eq!(
        format_lockfile_block("go.sum", "3 行追加, 1 行削除"),
        "### [lockfile要約] go.sum\n3 行追加, 1 行削除\n"
    );
}
