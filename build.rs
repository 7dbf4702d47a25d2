const MANIFEST: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<assembly xmlns="urn:schemas-microsoft-com:asm.v1" manifestVersion="1.0">
  <dependency>
    <dependentAssembly>
      <assemblyIdentity type="win32" name="Microsoft.Windows.Common-Controls" version="6.0.0.0"
        processorArchitecture="*" publicKeyToken="6595b64144ccf1df" language="*"/>
    </dependentAssembly>
  </dependency>
</assembly>
"#;

fn main() {
    println!("cargo:rerun-if-changed=assets/app_icon.ico");

    if std::env::var("CARGO_CFG_TARGET_OS").unwrap_or_default() != "windows" {
        return;
    }

    // The window subclass API lives in Common Controls v6.
    let mut res = winresource::WindowsResource::new();
    res.set_manifest(MANIFEST);

    let icon_path = "assets/app_icon.ico";
    if std::path::Path::new(icon_path).exists() {
        res.set_icon(icon_path);
    } else {
        println!("cargo:warning=No assets/app_icon.ico found; building without a program icon");
    }

    if let Err(e) = res.compile() {
        println!("cargo:warning=Failed to embed Windows resources: {}", e);
    }
}
