/// Stylesheet used when a survey carries no `custom_css`.
///
/// Element ids and classes match the markup produced by
/// [`crate::render_creative`]. `.invisible` hides the thank-you panel until
/// the survey ends and should be kept in custom stylesheets.
pub const DEFAULT_CSS: &str = r#"body {
    margin: 0 auto;
    display: block;
}

.invisible {
    display: none;
}

#master_container {
    background-color: #008000;
    width: 300px;
    height: 250px;
    border: solid black 1px;
    position: relative;
}

#survey_container {
    padding: 7px;
    padding-bottom: 3px;
}

.Qbox {
    font-family: 'Open Sans', sans-serif;
    font-size: 13px;
    padding: 2px 5px;
    height: 45px;
    width: 274px;
    border: 1px solid rgba(255, 255, 255, 0.290196);
    border-radius: 5px;
    color: white;
    text-shadow: rgba(0, 0, 0, 0.8) 1px 1px 1px;
    background-color: rgba(255, 255, 255, 0.14902);
    box-shadow: rgba(0, 0, 0, 0.8) 0px 0px 3px 0px;
    display: table;
}

.Qbox span {
    display: table-cell;
    vertical-align: middle;
}

.Abox {
    border: 1px solid rgba(255, 255, 255, 0.290196);
    border-radius: 5px;
    text-shadow: rgba(0, 0, 0, 0.8) 1px 1px 1px;
    background-color: rgba(255, 255, 255, 0.14902);
    box-shadow: rgba(0, 0, 0, 0.8) 0px 0px 3px 0px;
    position: relative;
    margin: 4px 0;
}

.Abox[selected="true"] {
    background-color: rgba(255, 127, 0, 0.7);
}

.Abox:hover {
    cursor: pointer;
    background-color: rgba(255, 127, 0, 0.4);
}

.AText {
    font-family: 'Open Sans', sans-serif;
    color: white;
    text-shadow: rgba(0, 0, 0, 0.8) 1px 1px 1px;
    padding-left: 5px;
    font-size: 12px;
    height: 27px;
    line-height: 27px;
}

#bottom_container {
    position: relative;
}

#next_button {
    font-family: 'Open Sans', sans-serif;
    font-size: 13px;
    position: absolute;
    right: 8px;
    top: 0px;
    color: beige;
    padding: 3px 15px;
    text-shadow: rgba(0, 0, 0, 1) 1px 1px 1px;
    background-color: rgba(255, 200, 0, 0.6);
    cursor: pointer;
}

#next_button:hover {
    background-color: rgba(255, 127, 80, 0.8);
    color: white;
}

#question_comment {
    color: #e8e7e7;
    margin: 0 -2px 0 7px;
    font-size: 13px;
}

.thankyoucontainer {
    height: 100px;
    width: 300px;
    position: absolute;
    top: 100px;
    left: 0px;
    text-align: center;
    font-family: 'Open Sans', sans-serif;
    font-size: 26px;
    color: beige;
    text-shadow: rgba(0, 0, 0, 0.8) 2px 2px 2px;
}

#ad_background {
    display: none;
    position: absolute;
    background-color: rgba(0, 118, 0, 0.5);
    width: 299px;
}

#ad_text {
    text-align: center;
    color: rgba(0, 98, 0, 0.5);
    font-size: 5px;
}

#back_button {
    margin-top: 8px;
}
"#;

/// Navigation script. Reads its state from the `sonar_config` JSON block.
///
/// Answers are recorded as `{question id}:{letters}` tokens (`1:A`, `3:AC`),
/// joined with `|` when submitted at the end. Selecting an unknown or `end`
/// target finishes the survey.
pub(crate) const NAVIGATION_SCRIPT: &str = r#"(function () {
  var config = JSON.parse(document.getElementById('sonar_config').textContent);
  var byId = {};
  config.questions.forEach(function (question) {
    byId[String(question.id)] = question;
  });

  var surveyContainer = document.getElementById('survey_container');
  var questionText = document.getElementById('question_text');
  var questionComment = document.getElementById('question_comment');
  var optionList = document.getElementById('option_list');
  var nextButton = document.getElementById('next_button');
  var thankYou = document.getElementById('thankyou_container');

  var answered = [];
  var current = null;
  var selected = [];

  function send(response) {
    if (config.manual_responses || !config.receiver_url || !response) {
      return;
    }
    var query = new URLSearchParams({
      ID: config.survey_id,
      Segmentation: config.segmentation,
      Response: response
    });
    var beacon = new Image();
    beacon.src = config.receiver_url + '?' + query.toString();
  }

  function shuffled(options) {
    var copy = options.slice();
    for (var i = copy.length - 1; i > 0; i--) {
      var j = Math.floor(Math.random() * (i + 1));
      var swap = copy[i];
      copy[i] = copy[j];
      copy[j] = swap;
    }
    return copy;
  }

  function finish() {
    if (!config.submit_immediately) {
      send(answered.join('|'));
    }
    surveyContainer.classList.add('invisible');
    nextButton.classList.add('invisible');
    thankYou.classList.remove('invisible');
  }

  function submit() {
    if (current.options.length === 0) {
      finish();
      return;
    }
    if (selected.length === 0) {
      return;
    }
    var letters = selected.slice().sort();
    var token = current.id + ':' + letters.join('');
    answered.push(token);
    if (config.submit_immediately) {
      send(token);
    }
    var next = byId[current.next_question[letters[0]]];
    if (next) {
      show(next);
    } else {
      finish();
    }
  }

  function toggle(box, option) {
    if (current.type !== 'MULTIPLE_OPTION') {
      selected = [option.id];
      submit();
      return;
    }
    var at = selected.indexOf(option.id);
    if (at === -1) {
      selected.push(option.id);
      box.setAttribute('selected', 'true');
    } else {
      selected.splice(at, 1);
      box.setAttribute('selected', 'false');
    }
  }

  function show(question) {
    current = question;
    selected = [];
    questionText.textContent = question.text;
    var multiple = question.type === 'MULTIPLE_OPTION';
    questionComment.textContent = multiple ? config.comment_text : '';
    nextButton.classList.toggle('invisible', !(multiple || question.options.length === 0));

    optionList.innerHTML = '';
    var options = question.answersOrder === 'ORDERED' ? question.options : shuffled(question.options);
    options.forEach(function (option, index) {
      var box = document.createElement('div');
      box.className = 'Abox';
      box.id = 'option_container_' + index;
      var text = document.createElement('div');
      text.className = 'AText';
      text.textContent = option.text;
      box.appendChild(text);
      box.addEventListener('click', function () {
        toggle(box, option);
      });
      optionList.appendChild(box);
    });
  }

  nextButton.addEventListener('click', submit);

  var first = byId['1'];
  if (first) {
    show(first);
  } else {
    finish();
  }
})();
"#;
