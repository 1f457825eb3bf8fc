/// Presentation-level view of a .pptx package.
use crate::ooxml::opc::PackURI;

/// The slide list of a presentation, resolved to slide partnames.
///
/// Slides appear in `<p:sldIdLst>` order, which is the order PowerPoint shows
/// them in, not the numeric order of their part names.
///
/// # Examples
///
/// ```rust,no_run
/// use contextmap::ooxml::pptx::Package;
///
/// let pkg = Package::open("template.pptx")?;
/// let pres = pkg.presentation()?;
/// for partname in pres.slide_partnames() {
///     println!("{}", partname);
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Presentation {
    slide_partnames: Vec<PackURI>,
}

impl Presentation {
    pub(crate) fn new(slide_partnames: Vec<PackURI>) -> Self {
        Self { slide_partnames }
    }

    #[inline]
    pub fn slide_count(&self) -> usize {
        self.slide_partnames.len()
    }

    #[inline]
    pub fn slide_partnames(&self) -> &[PackURI] {
        &self.slide_partnames
    }
}
