use kmodguard::config::PluginConfig;
use kmodguard::core::{ActionKind, PackageRef, PlannedAction, TransactionPlanner};
use kmodguard::host::{MemoryHost, TransactionSnapshot};
use kmodguard::traits::PackageHost;
use std::fs;

fn pkg(name: &str, version: &str, release: &str) -> PackageRef {
    PackageRef::new(name, version, release).with_arch("x86_64")
}

#[test]
fn test_el7_kernel_update_keeps_reusable_module() {
    // kmod built for 862 keeps serving 862.14 (same ABI), so nothing changes
    let config = PluginConfig::default();
    let kmod = pkg("kmod-nvidia-branch-460", "3.10.0", "862.1.el7");
    let mut host = MemoryHost::new()
        .with_installed([
            pkg("kernel", "3.10.0", "862.el7"),
            pkg("nvidia-driver-branch-460", "460.32.03", "1.el7"),
            kmod.clone(),
        ])
        .with_available([kmod])
        .with_pending(ActionKind::Install, pkg("kernel", "3.10.0", "862.14.4.el7"));

    let report = TransactionPlanner::new(&config)
        .run_transaction(&mut host)
        .unwrap();

    assert!(report.is_empty());
}

#[test]
fn test_plan_from_snapshot_file_converges_in_one_pass() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("tx.json");
    fs::write(
        &path,
        r#"{
          "installed": [
            {"name": "kernel", "version": "4.18.0", "release": "193.el8", "arch": "x86_64"},
            {"name": "kernel", "version": "4.18.0", "release": "240.el8", "arch": "x86_64"},
            {"name": "nvidia-driver-latest", "version": "460.32.03", "release": "1.el8", "arch": "x86_64"},
            {"name": "kmod-nvidia-latest", "version": "4.18.0", "release": "240.1.el8", "arch": "x86_64"}
          ],
          "available": [
            {"name": "kmod-nvidia-latest", "version": "4.18.0", "release": "193.1.el8", "arch": "x86_64"},
            {"name": "kmod-nvidia-latest", "version": "4.18.0", "release": "240.1.el8", "arch": "x86_64"},
            {"name": "kmod-nvidia-latest", "version": "4.18.0", "release": "240.3.el8", "arch": "x86_64"},
            {"name": "kmod-nvidia-latest", "version": "4.18.0", "release": "305.1.el8", "arch": "x86_64"}
          ],
          "pending": {
            "install": [
              {"name": "kernel", "version": "4.18.0", "release": "305.el8", "arch": "x86_64"}
            ],
            "erase": [
              {"name": "kernel", "version": "4.18.0", "release": "193.el8", "arch": "x86_64"}
            ]
          }
        }"#,
    )
    .unwrap();

    let config = PluginConfig::default();
    let mut host = TransactionSnapshot::load(&path).unwrap().into_host();
    let report = TransactionPlanner::new(&config)
        .run_transaction(&mut host)
        .unwrap();

    assert!(report.pre_resolve.is_empty());
    assert_eq!(
        report.post_resolve,
        vec![
            PlannedAction::Erase(pkg("kmod-nvidia-latest", "4.18.0", "240.1.el8")),
            PlannedAction::Install(pkg("kmod-nvidia-latest", "4.18.0", "305.1.el8")),
        ]
    );

    let pending = host.pending_actions().unwrap();
    assert_eq!(pending.get(ActionKind::TrueInstall).len(), 1);
    assert_eq!(pending.get(ActionKind::Erase).len(), 2);
}

#[test]
fn test_versioned_scheme_from_kdl_config() {
    let tmp = tempfile::tempdir().unwrap();
    let config_path = tmp.path().join("kmodguard.kdl");
    fs::write(
        &config_path,
        "driver-pattern \"^nvidia-driver$\"\nnaming \"versioned\"\n",
    )
    .unwrap();
    let config = PluginConfig::load(Some(config_path.as_path())).unwrap();

    let driver = pkg("nvidia-driver", "460.32.03", "1.el8");
    let old = pkg("kmod-nvidia-460.32.03-4.18.0-193", "460.32.03", "1.el8");
    let new = pkg("kmod-nvidia-460.32.03-4.18.0-240", "460.32.03", "1.el8");
    let mut host = MemoryHost::new()
        .with_installed([pkg("kernel", "4.18.0", "193.el8"), driver, old.clone()])
        .with_available([old.clone(), new.clone()])
        .with_pending(ActionKind::Install, pkg("kernel", "4.18.0", "240.el8"));

    let actions = TransactionPlanner::new(&config)
        .on_post_resolve(&mut host)
        .unwrap();

    assert_eq!(
        actions,
        vec![PlannedAction::Erase(old), PlannedAction::Install(new)]
    );
}

#[test]
fn test_scan_then_resolve_on_same_host() {
    let config = PluginConfig::default();
    let planner = TransactionPlanner::new(&config);
    let mut host = MemoryHost::new()
        .with_installed([
            pkg("kernel", "5.0", "100.fc30"),
            pkg("nvidia-driver-latest", "460.32.03", "1.fc30"),
            pkg("kmod-nvidia-latest", "5.0", "100.1.fc30"),
        ])
        .with_available([
            pkg("kernel", "5.1", "200.fc30"),
            pkg("kernel-core", "5.1", "200.fc30"),
            pkg("kmod-nvidia-latest", "5.3", "10.1.fc30"),
        ]);

    let excluded = planner.on_candidate_scan(&mut host).unwrap();
    assert_eq!(excluded.len(), 2);
    assert!(host.excluded().contains(&pkg("kernel", "5.1", "200.fc30")));

    // Nothing pending afterwards: resolve hooks have nothing to do
    let report = planner.run_transaction(&mut host).unwrap();
    assert!(report.is_empty());
}
