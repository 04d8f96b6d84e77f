//! Inline styles and scripts

pub(crate) const BASE_STYLE: &str = r#"
*,*::before,*::after{box-sizing:border-box}
body{margin:0;font-family:system-ui,sans-serif;color:#171717;background:#fafafa}
.truncate{overflow:hidden;text-overflow:ellipsis;white-space:nowrap}
"#;

pub(crate) const ACQUISITION_STYLE: &str = r#"
.landing{min-height:100vh;display:flex;flex-direction:column;align-items:center;justify-content:center;padding:1rem}
.landing h1{font-size:3rem;margin:0 0 .5rem}
.landing .tagline{color:#737373;max-width:28rem;text-align:center;margin:0 0 3rem}
.drop-zone{position:relative;width:100%;max-width:36rem;padding:3rem;border:2px dashed #e5e5e5;border-radius:1.5rem;background:#fff;text-align:center;cursor:pointer}
.drop-zone.dragging{border-color:#3b82f6;background:#eff6ff}
.drop-zone input{position:absolute;inset:0;opacity:0;cursor:pointer}
.message{margin-top:1.5rem;padding:.75rem 1rem;border-radius:.5rem;background:#fef2f2;color:#b91c1c}
.busy{margin-top:2rem;color:#737373}
"#;

pub(crate) const READER_STYLE: &str = r#"
.reader{display:flex;height:100vh;overflow:hidden;background:#fff}
.sidebar{width:20rem;flex-shrink:0;display:flex;flex-direction:column;border-right:1px solid #e5e5e5;background:#fafafa}
.sidebar header{padding:1.5rem;border-bottom:1px solid #e5e5e5}
.sidebar h2{margin:0;font-size:1rem}
.sidebar .caption{margin:.25rem 0 0;font-size:.75rem;text-transform:uppercase;letter-spacing:.05em;color:#737373}
#toc{flex:1;overflow-y:auto;padding:1rem}
.toc-entries{list-style:none;margin:0;padding:0}
.toc-entry{position:relative}
.toc-guide{position:absolute;top:0;bottom:0;border-left:1px solid #e5e5e5}
.toc-link{width:100%;display:flex;align-items:center;padding:.375rem .5rem .375rem 0;border:0;background:none;text-align:left;font-size:.875rem;color:#525252;cursor:pointer}
.toc-link:hover{color:#171717}
.toc-link.active{color:#2563eb;font-weight:600}
.sidebar footer{padding:1rem;border-top:1px solid #e5e5e5}
.sidebar footer a{font-size:.875rem;color:#737373;text-decoration:none}
.content{flex:1;overflow-y:auto}
.reading-pane{max-width:48rem;margin:0 auto;padding:4rem 3rem}
.paper-section{margin-bottom:4rem;scroll-margin-top:3rem}
.heading-primary{font-size:1.875rem;padding-bottom:.5rem;border-bottom:1px solid #f5f5f5}
.heading-secondary{font-size:1.25rem;margin-top:2rem}
.paragraph{font-family:Georgia,serif;font-size:1.125rem;line-height:1.75;color:#404040;white-space:pre-wrap}
.figure{margin:2rem 0;border:1px solid #e5e5e5;border-radius:.75rem;overflow:hidden}
.figure img{display:block;width:100%;height:auto;background:#f5f5f5}
.figure-missing{min-height:8rem;background:#f5f5f5}
.figure figcaption{padding:.5rem 1rem;font-size:.875rem;color:#737373}
"#;

pub(crate) const ACQUISITION_SCRIPT: &str = r#"
(function(){
  var zone=document.getElementById('drop-zone');
  var form=document.getElementById('upload-form');
  var input=document.getElementById('file-upload');
  var label=document.getElementById('drop-label');
  function submit(){label.textContent='Processing...';document.getElementById('busy').hidden=false;form.submit();}
  zone.addEventListener('dragover',function(e){e.preventDefault();zone.classList.add('dragging');});
  zone.addEventListener('dragleave',function(){zone.classList.remove('dragging');});
  zone.addEventListener('drop',function(e){
    e.preventDefault();zone.classList.remove('dragging');
    if(e.dataTransfer.files&&e.dataTransfer.files[0]){input.files=e.dataTransfer.files;submit();}
  });
  input.addEventListener('change',function(){if(input.files&&input.files[0]){submit();}});
})();
"#;

pub(crate) const READER_SCRIPT: &str = r#"
(function(){
  var toc=document.getElementById('toc');
  function post(url,id){
    return fetch(url,{method:'POST',headers:{'Content-Type':'application/json'},body:JSON.stringify({section:id})})
      .then(function(r){return r.ok?r.json():null;});
  }
  function highlight(active){
    toc.querySelectorAll('.toc-link').forEach(function(b){
      var on=b.dataset.section===active;
      b.classList.toggle('active',on);
      if(on){b.setAttribute('aria-current','true');}else{b.removeAttribute('aria-current');}
    });
  }
  toc.addEventListener('click',function(e){
    var b=e.target.closest('.toc-link');if(!b){return;}
    post('/reader/toc',b.dataset.section).then(function(res){
      if(!res||!res.scroll){return;}
      var el=document.querySelector('.paper-section[data-section="'+CSS.escape(res.scroll.anchor)+'"]');
      if(el){el.scrollIntoView({behavior:res.scroll.behavior});}
      highlight(res.active);
    });
  });
  document.querySelectorAll('.paper-section').forEach(function(s){
    s.addEventListener('mouseenter',function(){
      post('/reader/sections/enter',s.dataset.section).then(function(res){
        if(res){highlight(res.active);}
      });
    });
  });
})();
"#;
