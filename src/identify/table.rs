//! The built-in rule table.
//!
//! Literal rules come first and are kept specific (long token lists) so that
//! at most one of them matches a given magic/mime pair. Functional rules
//! follow as fallbacks for coarse categories such as `Zip`, `XML`, `data`,
//! `text` and `PE32`; a literal match therefore always beats a functional
//! one. Where token sets overlap, table order is the priority.

use crate::core::platform::PlatformSet as P;
use crate::identify::rules::Rule;

const ANY: P = P::ANY;
const WIN: P = P::WINDOWS;
const MAC: P = P::MACOS;
const LINUX: P = P::LINUX;
const IOS: P = P::IOS;

fn lit(tokens: &[&str], mime: &str, ext: &str, label: &str, platforms: P, analyze_further: bool) -> Rule {
    Rule::literal(tokens, mime, ext, label, platforms, analyze_further)
}

const CDF_V2: &[&str] = &["Composite", "Document", "File", "V2", "Document"];

fn office() -> Vec<Rule> {
    vec![
        lit(CDF_V2, "ms-excel", "xls", "Excel Spreadsheet", WIN, true),
        lit(CDF_V2, "ms-powerpoint", "ppt", "PowerPoint Presentation", WIN, true),
        lit(&["Composite", "Document", "File", "V2"], "msword", "doc", "Microsoft Word Document", WIN, true),
        lit(
            &["Microsoft", "Excel"],
            "openxmlformats-officedocument.spreadsheetml.sheet",
            "xlsx",
            "Microsoft Excel Open XML Spreadsheet",
            WIN,
            true,
        ),
        lit(
            &["Microsoft", "PowerPoint"],
            "openxmlformats-officedocument.presentationml.presentation",
            "pptx",
            "PowerPoint Open XML Presentation",
            WIN,
            true,
        ),
        lit(&["OpenDocument", "Text"], "oasis.opendocument.text", "odt", "OpenDocument Text Document", ANY, true),
        lit(&["OpenOffice"], "octet-stream", "odt", "OpenDocument Text Document", WIN, true),
        lit(&["Hangul", "(Korean)", "Word", "Processor"], "hwp", "hwp", "Hangul (Korean) Word Processor", WIN, true),
        lit(
            &["Microsoft", "Word"],
            "openxmlformats-officedocument.wordprocessingml.document",
            "docx",
            "Microsoft Word Open XML Document",
            WIN,
            true,
        ),
        lit(&["OpenDocument", "Spreadsheet"], "opendocument.spreadsheet", "ods", "OpenDocument Spreadsheet", WIN, true),
        lit(&["OpenDocument"], "opendocument.presentation", "odp", "OpenDocument Presentation", WIN, true),
        lit(&["CDFV2", "Microsoft", "Excel"], "ms-excel", "xlsx", "Excel Spreadsheet", WIN, true),
        lit(CDF_V2, "ms-office", "cdf", "CDF file", WIN, true),
        lit(&["CDFV2", "Encrypted"], "encrypted", "cdf", "CDF file", WIN, false),
        lit(&["CDFV2", "Microsoft", "Outlook"], "ms-outlook", "cdf", "CDF file", WIN, false),
        lit(&["Microsoft"], "octet", "doc", "Microsoft Document", WIN, true),
    ]
}

fn archives() -> Vec<Rule> {
    vec![
        lit(&["Dzip"], "octet-stream", "dzip", "Witcher 2 game file", WIN, false),
        lit(&["7-zip"], "x-7z-compressed", "7zip", "Compressed archive", WIN, false),
        lit(&["bzip2"], "x-bzip2", "bzip", "Compressed file", LINUX, false),
        lit(&["gzip"], "gzip", "gz", "Compression file", WIN, false),
        lit(&["ACE", "archive"], "octet-stream", "ace", "ACE archive", WIN, true),
        lit(&["MS", "Compress"], "octet-stream", "mscompress", "Microsoft (de)compressor", WIN, false),
        lit(&["Microsoft", "Cabinet", "archive", "data"], "vnd.ms-cab", "cab", "Windows Cabinet File", WIN, false),
        lit(&["POSIX", "tar"], "tar", "tar", "Consolidated Unix File Archive", LINUX, true),
        lit(&["RAR"], "rar", "rar", "WinRAR Compressed Archive", WIN, true),
        lit(&["KGB"], "octet-stream", "kgb", "Discontinued file archiver", WIN | LINUX, false),
        lit(&["ASD", "archive"], "octet-stream", "asd", "ASD archive", WIN, false),
        lit(&["ARJ"], "x-arj", "arj", "Compressed file archive", WIN | MAC, false),
        lit(&["ARC"], "x-arc", "arc", "Compressed file", WIN | MAC, false),
    ]
}

fn apple() -> Vec<Rule> {
    vec![
        lit(&["Apple", "HFS"], "octet-stream", "ico", "Icon File", MAC, false),
        lit(&["zlib"], "zlib", "dmg", "Apple Disk Image", MAC, false),
        lit(&["AppleSingle"], "octet-stream", "applesingle", "Mac File format", MAC, false),
        lit(&["AppleDouble"], "octet-stream", "appledouble", "iOS application archive file", MAC, false),
        lit(&["Apple", "binary", "property"], "octet-stream", "appleplist", "Apple binary", MAC, false),
        lit(&["iOS", "App"], "x-ios-app", "ipa", "iOS application archive file", IOS, false),
        lit(&["Macintosh", "HFS"], "octet-stream", "machfs", "Macintosh HFS", MAC, false),
        lit(&["Symbian"], "x-sisx-app", "sis", "Software Installation Script", MAC, false),
        lit(&["Mach-O"], "x-mach-binary", "mac", "Bitmap graphic", MAC, false),
    ]
}

fn images() -> Vec<Rule> {
    vec![
        lit(&["PNG"], "png", "png", "Portable Network Graphic", WIN, false),
        lit(&["JPEG"], "jpeg", "jpg", "JPEG Image", WIN, false),
        lit(&["SVG"], "svg+xml", "svg", "Scalable vector graphics", WIN, false),
        lit(&["PC", "bitmap"], "x-ms-bmp", "bmp", "Bitmap Image File", WIN, true),
        lit(&["Targa"], "x-tga", "tga", "Truevision Graphics Adapter image file", WIN | MAC, false),
        lit(&["GIF", "image", "data"], "gif", "gif", "Graphical Interchange Format File", WIN, false),
        lit(&["JNG"], "x-jng", "jng", "Image file related to PNG", WIN, false),
        lit(&["GIMP", "XCF", "image"], "x-xcf", "xcf", "GIMP XFC file", WIN | LINUX | MAC, false),
        lit(&["TIFF"], "tiff", "tiff", "Tagged Image File Format", WIN | LINUX, false),
        lit(&["icon"], "image/x-icon", "ico", "Icon File", WIN, false),
    ]
}

fn media() -> Vec<Rule> {
    vec![
        lit(&["RIFF"], "x-wav", "wav", "WAVE Audio File", WIN, false),
        lit(
            &["Macromedia", "Flash", "data", "(compressed)"],
            "x-shockwave-flash",
            "swf",
            "Shockwave Flash Movie",
            WIN,
            true,
        ),
        lit(&["RIFF"], "msvideo", "avi", "Audio Video Interleave File", WIN, true),
        lit(&["Macromedia", "Flash", "Video"], "x-flv", "flv", "Flash Video File", WIN, true),
        lit(&["ISO"], "quicktime", "qt", "QuickTime file", MAC, false),
        lit(&["MPEG", "sequence"], "", "mpeg", "Compression for video and audio", WIN, false),
        lit(&["MPEG", "transport"], "", "mpeg", "Compression for video and audio", WIN, false),
        lit(&["PCH", "ROM"], "octet", "rom", "N64 Game ROM File", WIN, false),
        lit(&["ISO", "Media"], "video/mp4", "mp4", "MPEG-4 Video File", WIN | MAC, false),
        lit(&["contains:MPEG"], "mpeg", "mp3", "MP3 Audio File", WIN, true),
        lit(&["3GPP", "MPEG", "v4"], "octet-stream", "3gp", "3GPP Multimedia File", WIN, false),
    ]
}

fn miscellaneous() -> Vec<Rule> {
    vec![
        lit(&["RPM"], "rpm", "rpm", "Red Hat Package Manager File", LINUX, false),
        lit(&["Debian", "binary", "package"], "vnd.debian.binary-package", "deb", "Debian Software Package", LINUX, false),
        lit(&["RealMedia", "file"], "vnd.rn-realmedia", "rm", "RealMedia File", ANY, false),
        lit(&["COM", "executable"], "application", "com", "DOS Command File", WIN, false),
        lit(&["Python", "script"], "x-python", "py", "Python Script", P::ANY_DESKTOP, true),
        lit(&["PDF"], "pdf", "pdf", "Portable Document Format File", WIN, true),
        lit(CDF_V2, "msi", "msi", "Windows Installer Package", WIN, true),
        lit(&["Rich", "Text"], "rtf", "rtf", "Rich Text Format File", WIN, true),
        lit(&["PostScript", "document"], "postscript", "ps", "Encapsulated PostScript File", WIN, false),
        lit(&["(DLL)"], "x-dosexec", "dll", "Dynamic linked library", WIN, true),
        lit(&["MS", "Windows", "shortcut"], "octet-stream", "lnk", "Windows Shortcut", WIN, false),
        lit(&["Adobe", "Photoshop", "Image"], "adobe.photoshop", "psd", "Adobe Photoshop Document", WIN | MAC, false),
        lit(&["Microsoft", "ASF"], "ms-asf", "asf", "Advanced Systems Format File", WIN, false),
        lit(&["Google", "Chrome", "extension"], "x-chrome-extension", "crx", "Chrome Extension", P::ANY_DESKTOP, false),
        lit(&["compiled", "Java", "class"], "java-applet", "class", "Java Class File", WIN | MAC, false),
        lit(&["PHP"], "x-php", "php", "PHP Source Code File", WIN, false),
        lit(&["Intel", "serial", "flash"], "octet", "rom", "N64 Game ROM File", WIN, false),
        lit(&["BitTorrent"], "x-bittorrent", "bittorrent", "Bittorent link", WIN | MAC, false),
        lit(&["compiled", "Java", "class"], "x-java-applet", "class", "Java class file", WIN, true),
        lit(&["Bourne-Again", "shell"], "x-shellscript", "sh", "Shell script", LINUX, false),
        lit(&["MIDI"], "midi", "midi", "Musical Instrument Digital Interface", WIN, false),
        lit(&["MS-DOS"], "x-dosexec", "exe", "DOS MZ executable", WIN, false),
        lit(&["Perl", "script"], "x-perl", "perl", "Perl script", WIN | LINUX, false),
        lit(&["Ogg"], "ogg", "ogg", "Free open container format", WIN | MAC, false),
        lit(&["ISO", "9660"], "x-iso9660-image", "iso", "ISO Image", WIN, false),
        lit(&["TeX", "font"], "x-tex-tfm", "latex", "LaTeX file format", WIN | LINUX, false),
        lit(&["awk"], "x-awk", "awk", "Script for text processing", LINUX, false),
        lit(&["Adobe", "InDesign"], "octet-stream", "indd", "InDesign project file", WIN, false),
        lit(&["Ruby", "script"], "x-ruby", "ruby", "Ruby interpreted file", WIN, false),
        lit(&["/opt/vagrant/embedded/bin/ruby"], "plain", "ruby", "Ruby interpreted file", WIN, false),
        lit(&["Windows", "Enhanced", "Metafile"], "octet-stream", "emf", "Windows enhanced metafile", WIN, false),
        lit(&["E-book"], "octet-stream", "ebook", "Ebook file", WIN, false),
        lit(&["ELF"], "application", "elf", "Linux Executable", LINUX, false),
        lit(&["FLAC"], "x-flac", "flac", "Free lossless audio codec", WIN, false),
        lit(&["SMTP"], "rfc822", "email", "Email file", WIN, false),
        lit(&["FLC"], "x-flc", "flc", "Animation file", MAC, false),
        lit(&["TrueType", "Font"], "font-sfnt", "ttf", "TrueType Font", WIN, false),
        lit(&["capture"], "tcpdump.pcap", "pcap", "Network traffic data", WIN, false),
        lit(&["capture"], "octet-stream", "pcap", "Network traffic data", WIN, false),
        lit(&["Netscape", "cookie"], "plain", "iecookie", "Cookie for ie", WIN, false),
    ]
}

fn functional() -> Vec<Rule> {
    use crate::identify::disambiguate as d;
    vec![
        Rule::functional(
            &["Composite", "Document", "File", "V2", "Document", "Can't", "read", "SAT"],
            "application/CDFV2",
            false,
            "sat",
            d::sat,
        ),
        Rule::functional(
            &["Composite", "Document", "File", "V2", "Document", "Cannot", "read", "section"],
            "application/CDFV2",
            false,
            "section",
            d::section,
        ),
        Rule::functional(&["Zip"], "zip", true, "zip", d::zip),
        Rule::functional(&["(JAR)"], "java-archive", true, "jar", d::jar),
        Rule::functional(&["data"], "octet", false, "octet", d::octet),
        Rule::functional(&["XML"], "xml", false, "xml", d::xml),
        Rule::functional(&["HTML", "document"], "html", true, "html", d::html),
        Rule::functional(&["text"], "text", false, "text", d::text),
        Rule::functional(&["text"], "plain", false, "text", d::text),
        Rule::functional(&["PE32"], "x-dosexec", true, "pe32", d::pe32),
        Rule::functional(&["Macromedia", "Flash", "data"], "x-shockwave-flash", false, "flash", d::flash),
    ]
}

/// The reference rule list, in priority order.
pub(crate) fn builtin_rules() -> Vec<Rule> {
    [office(), archives(), apple(), images(), media(), miscellaneous(), functional()]
        .into_iter()
        .flatten()
        .collect()
}
